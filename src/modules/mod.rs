// Declare all modules
pub mod accounts;
pub mod confirmation;
pub mod credentials;
pub mod email;
pub mod utils;

// No re-exports here as they're handled in lib.rs
