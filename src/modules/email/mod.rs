pub mod mailer;
pub mod smtp;
pub mod templates;

// Re-export the main types and functions
pub use mailer::{Mailer, SmtpMailer};
pub use smtp::SmtpConfig;
