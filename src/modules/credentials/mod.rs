pub mod codec;
pub mod secret;

// Re-export the main types and functions
pub use codec::{create_credential, verify_credential, CredentialError};
pub use secret::{generate_temporary_secret, random_alphanumeric};
