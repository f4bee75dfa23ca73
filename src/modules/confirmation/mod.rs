pub mod handshake;
pub mod tokens;

// Re-export the main types and functions
pub use handshake::{run_confirmation, ConfirmError, ConfirmOutcome};
pub use tokens::{TokenError, TokenIssuer, TokenVault};
