use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use serde::{Deserialize, Serialize};

use crate::modules::credentials::random_alphanumeric;
use crate::modules::utils::time::unix_now;
use crate::STATUS_ACTIVE;

/// Length of a generated security stamp.
const STAMP_LENGTH: usize = 32;

/// Represents a single account with its credential and confirmation state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub username: String,            // Original username as entered (for display)
    pub username_normalized: String, // Lowercase version for lookups and comparisons
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub rank: u32,
    pub department: String,
    pub user_type: String,
    pub status: String, // Open set of status tags; "active" gates authentication
    pub credential: String,
    pub security_stamp: String, // Rotated on confirmation so stale sessions die
    pub confirmed: bool,
    pub created_at: u64,
}

impl Account {
    /// Build a fresh, unconfirmed account record with a new id and stamp.
    /// Profile fields start empty; the caller fills them in before insert.
    pub fn new(username: &str, email: &str, status: &str, credential: String) -> Self {
        let original_username = username.trim().to_string();
        let username_normalized = original_username.to_lowercase();

        Account {
            id: random_alphanumeric(16),
            username: original_username,
            username_normalized,
            email: email.trim().to_string(),
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            rank: 0,
            department: String::new(),
            user_type: String::new(),
            status: status.to_string(),
            credential,
            security_stamp: random_alphanumeric(STAMP_LENGTH),
            confirmed: false,
            created_at: unix_now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Errors from account store operations
#[derive(Debug, PartialEq)]
pub enum StoreError {
    NotFound,
    AlreadyExists,
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "account not found"),
            StoreError::AlreadyExists => write!(f, "account already exists"),
            StoreError::Unavailable(details) => write!(f, "account store unavailable: {}", details),
        }
    }
}

impl std::error::Error for StoreError {}

/// Capability interface over whatever persistence backs the accounts.
///
/// The confirmation handshake and the account service only see this trait;
/// a relational backend plugs in behind it without touching either.
pub trait AccountStore {
    fn fetch_by_id(&self, id: &str) -> Result<Account, StoreError>;
    fn fetch_by_username(&self, username: &str) -> Result<Account, StoreError>;
    fn insert(&self, account: Account) -> Result<(), StoreError>;
    fn update_credential(&self, id: &str, credential: &str) -> Result<(), StoreError>;
    fn update_status(&self, id: &str, status: &str) -> Result<(), StoreError>;
    /// Replace the account's security stamp with a fresh random one.
    fn rotate_security_stamp(&self, id: &str) -> Result<(), StoreError>;
    fn mark_confirmed(&self, id: &str) -> Result<(), StoreError>;
}

/// Thread-safe in-memory account store, keyed by account id
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    // Lock the map, mapping a poisoned lock to Unavailable rather than panicking
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Account>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::Unavailable("account map lock poisoned".to_string()))
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.lock()?;
        match accounts.get_mut(id) {
            Some(account) => {
                apply(account);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryAccountStore {
    fn fetch_by_id(&self, id: &str) -> Result<Account, StoreError> {
        let accounts = self.lock()?;
        accounts.get(id).cloned().ok_or(StoreError::NotFound)
    }

    fn fetch_by_username(&self, username: &str) -> Result<Account, StoreError> {
        let normalized = username.trim().to_lowercase();
        let accounts = self.lock()?;
        accounts
            .values()
            .find(|a| a.username_normalized == normalized)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.lock()?;
        if accounts.contains_key(&account.id) {
            return Err(StoreError::AlreadyExists);
        }
        if accounts
            .values()
            .any(|a| a.username_normalized == account.username_normalized)
        {
            return Err(StoreError::AlreadyExists);
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    fn update_credential(&self, id: &str, credential: &str) -> Result<(), StoreError> {
        self.update(id, |account| account.credential = credential.to_string())
    }

    fn update_status(&self, id: &str, status: &str) -> Result<(), StoreError> {
        self.update(id, |account| account.status = status.to_string())
    }

    fn rotate_security_stamp(&self, id: &str) -> Result<(), StoreError> {
        self.update(id, |account| {
            account.security_stamp = random_alphanumeric(STAMP_LENGTH)
        })
    }

    fn mark_confirmed(&self, id: &str) -> Result<(), StoreError> {
        self.update(id, |account| account.confirmed = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::credentials::create_credential;

    fn sample_account(username: &str) -> Account {
        let credential = create_credential("Password123!").unwrap();
        Account::new(username, "test@example.com", STATUS_ACTIVE, credential)
    }

    #[test]
    fn test_insert_and_fetch() {
        let store = MemoryAccountStore::new();
        let account = sample_account("TestUser");
        let id = account.id.clone();
        store.insert(account.clone()).unwrap();

        // The fetched record compares equal to what was inserted
        let by_id = store.fetch_by_id(&id).unwrap();
        assert_eq!(by_id, account);
        assert_eq!(by_id.username, "TestUser");
        assert_eq!(by_id.username_normalized, "testuser");
        assert!(!by_id.confirmed);

        // Username lookup is case-insensitive
        let by_name = store.fetch_by_username("TESTUSER").unwrap();
        assert_eq!(by_name.id, id);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MemoryAccountStore::new();
        store.insert(sample_account("Dup")).unwrap();
        assert_eq!(
            store.insert(sample_account("dup")),
            Err(StoreError::AlreadyExists)
        );
    }

    #[test]
    fn test_unknown_account_is_not_found() {
        let store = MemoryAccountStore::new();
        assert_eq!(store.fetch_by_id("missing"), Err(StoreError::NotFound));
        assert_eq!(
            store.update_credential("missing", "x:y"),
            Err(StoreError::NotFound)
        );
    }

    #[test]
    fn test_stamp_rotation_changes_stamp() {
        let store = MemoryAccountStore::new();
        let account = sample_account("Stamped");
        let id = account.id.clone();
        let original_stamp = account.security_stamp.clone();
        store.insert(account).unwrap();

        store.rotate_security_stamp(&id).unwrap();
        let rotated = store.fetch_by_id(&id).unwrap();
        assert_ne!(rotated.security_stamp, original_stamp);
        assert_eq!(rotated.security_stamp.len(), STAMP_LENGTH);
    }

    #[test]
    fn test_status_update_and_active_flag() {
        let store = MemoryAccountStore::new();
        let account = sample_account("StatusUser");
        let id = account.id.clone();
        store.insert(account).unwrap();

        assert!(store.fetch_by_id(&id).unwrap().is_active());
        store.update_status(&id, "suspended").unwrap();
        assert!(!store.fetch_by_id(&id).unwrap().is_active());
    }
}
