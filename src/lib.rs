// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    accounts,
    confirmation,
    credentials,
    email,
    utils,
};

// Re-export commonly used types
pub use modules::accounts::service::{AccountError, AccountService, AuthOutcome, NewAccount};
pub use modules::accounts::store::{Account, AccountStore, MemoryAccountStore, StoreError};
pub use modules::confirmation::handshake::{ConfirmError, ConfirmOutcome};
pub use modules::confirmation::tokens::{TokenError, TokenIssuer, TokenVault};
pub use modules::credentials::{create_credential, generate_temporary_secret, verify_credential};
pub use modules::email::{Mailer, SmtpConfig, SmtpMailer};

// Constants
pub const STATUS_ACTIVE: &str = "active";

// Type aliases
pub type HmacSha256 = hmac::Hmac<sha2::Sha256>;
