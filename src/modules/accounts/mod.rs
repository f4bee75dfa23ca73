pub mod service;
pub mod store;

// Re-export the main types and functions
pub use service::{AccountError, AccountService, AuthOutcome, NewAccount};
pub use store::{Account, AccountStore, MemoryAccountStore, StoreError};
