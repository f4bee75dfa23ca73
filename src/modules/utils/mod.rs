pub mod logging;
pub mod time;
pub mod validate;

// Re-export the main types and functions
pub use logging::{initialize_logging, log_auth_event, log_store_operation};
pub use time::unix_now;
pub use validate::{is_valid_email, require_field};
