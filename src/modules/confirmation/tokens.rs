use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use crate::modules::credentials::random_alphanumeric;
use crate::modules::utils::time::unix_now;

/// Length of an issued confirmation token.
const TOKEN_LENGTH: usize = 32;

/// Errors from token issuance
#[derive(Debug, PartialEq)]
pub enum TokenError {
    Unavailable(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Unavailable(details) => write!(f, "token store unavailable: {}", details),
        }
    }
}

impl std::error::Error for TokenError {}

/// Capability interface for issuing and consuming confirmation tokens.
///
/// A token is bound to exactly one account and is destroyed by its first
/// successful validation. Implementations must make validate-and-consume
/// atomic so two racing confirmations cannot both win.
pub trait TokenIssuer {
    /// Issue a token for the account, replacing any token issued earlier.
    /// A token must never be handed out unless it is also on record, so a
    /// storage failure here is an error, not a best-effort insert.
    fn issue(&self, account_id: &str) -> Result<String, TokenError>;
    /// Check the token against the one on record and consume it on match.
    /// Returns false for unknown accounts, mismatches, and expired tokens.
    fn validate_and_consume(&self, account_id: &str, token: &str) -> bool;
}

struct IssuedToken {
    token: String,
    // First second at which the token is no longer valid; None means the
    // token lives until consumed.
    expires_at: Option<u64>,
}

/// In-memory single-use token vault, keyed by account id.
///
/// The default vault never expires tokens, matching the behavior this design
/// started from; `with_expiry` opts into a validity window.
pub struct TokenVault {
    tokens: Mutex<HashMap<String, IssuedToken>>,
    ttl: Option<Duration>,
}

impl TokenVault {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl: None,
        }
    }

    pub fn with_expiry(ttl: Duration) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }
}

impl Default for TokenVault {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIssuer for TokenVault {
    fn issue(&self, account_id: &str) -> Result<String, TokenError> {
        let token = random_alphanumeric(TOKEN_LENGTH);
        let entry = IssuedToken {
            token: token.clone(),
            expires_at: self.ttl.map(|ttl| unix_now() + ttl.as_secs()),
        };
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|_| TokenError::Unavailable("token map lock poisoned".to_string()))?;
        tokens.insert(account_id.to_string(), entry);
        Ok(token)
    }

    fn validate_and_consume(&self, account_id: &str, token: &str) -> bool {
        // The whole check-and-remove runs under the lock, so at most one
        // caller can consume a given token.
        let mut tokens = match self.tokens.lock() {
            Ok(tokens) => tokens,
            Err(_) => return false,
        };

        enum Check {
            Valid,
            Expired,
            Mismatch,
        }

        let check = match tokens.get(account_id) {
            Some(entry) if entry.token == token => match entry.expires_at {
                Some(expires_at) if unix_now() >= expires_at => Check::Expired,
                _ => Check::Valid,
            },
            _ => Check::Mismatch,
        };

        match check {
            Check::Valid => {
                tokens.remove(account_id);
                true
            }
            Check::Expired => {
                // Expired tokens are dead either way; drop the entry
                tokens.remove(account_id);
                false
            }
            Check::Mismatch => false,
        }
    }
}
