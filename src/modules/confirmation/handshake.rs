use std::fmt;

use crate::modules::accounts::store::{AccountStore, StoreError};
use crate::modules::credentials::{create_credential, generate_temporary_secret};
use crate::modules::email::templates;
use crate::modules::email::Mailer;
use crate::modules::utils::logging::{log_auth_event, log_store_operation};

use super::tokens::TokenIssuer;

/// Outcome of a confirmation attempt
#[derive(Debug, PartialEq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// Unknown account, wrong token, or already-consumed token. All three
    /// look the same to the caller so the endpoint cannot be used to probe
    /// which account ids exist.
    Failed,
}

/// Internal failures of the confirmation handshake, distinct from a plain
/// Failed outcome
#[derive(Debug, PartialEq)]
pub enum ConfirmError {
    /// Store unavailable before the token was touched; safe to retry.
    Storage(StoreError),
    /// The token was consumed but a follow-up write failed. The account is
    /// stuck pending with no valid token and needs operator intervention.
    Integrity(String),
    /// Credential rotated and persisted, but the notification never went
    /// out. The user holds no usable password until a new one is delivered.
    Mail(String),
}

impl fmt::Display for ConfirmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmError::Storage(e) => write!(f, "confirmation aborted: {}", e),
            ConfirmError::Integrity(details) => {
                write!(f, "confirmation left account inconsistent: {}", details)
            }
            ConfirmError::Mail(details) => {
                write!(f, "confirmed but notification failed: {}", details)
            }
        }
    }
}

impl std::error::Error for ConfirmError {}

/// Run the email-confirmation handshake for one account.
///
/// On success the account's security stamp is rotated (stale sessions die),
/// a fresh temporary password is derived and persisted in place of the
/// admin-supplied credential, the account is marked confirmed, and the
/// plaintext temporary password is mailed to the account's address.
///
/// Writes are ordered persist-first, notify-last: once the token is consumed
/// every storage failure surfaces as `Integrity`, and a mail failure after
/// persistence surfaces as `Mail`, never as Confirmed.
pub fn run_confirmation<S, T, M>(
    store: &S,
    tokens: &T,
    mailer: &M,
    account_id: &str,
    token: &str,
) -> Result<ConfirmOutcome, ConfirmError>
where
    S: AccountStore,
    T: TokenIssuer,
    M: Mailer,
{
    if account_id.is_empty() || token.is_empty() {
        return Ok(ConfirmOutcome::Failed);
    }

    let account = match store.fetch_by_id(account_id) {
        Ok(account) => account,
        Err(StoreError::NotFound) => {
            log_auth_event("confirm", account_id, false, Some("unknown account"));
            return Ok(ConfirmOutcome::Failed);
        }
        Err(e) => return Err(ConfirmError::Storage(e)),
    };

    if !tokens.validate_and_consume(account_id, token) {
        log_auth_event("confirm", account_id, false, Some("token rejected"));
        return Ok(ConfirmOutcome::Failed);
    }

    // The token is consumed past this point. Storage failures from here on
    // leave the account pending with no valid token, hence Integrity.
    store.rotate_security_stamp(account_id).map_err(|e| {
        log_store_operation("rotate_stamp", account_id, false, Some(&e.to_string()));
        ConfirmError::Integrity(format!("stamp rotation failed: {}", e))
    })?;

    let temporary_password = generate_temporary_secret();
    let credential = create_credential(&temporary_password)
        .map_err(|e| ConfirmError::Integrity(format!("credential derivation failed: {}", e)))?;

    store.update_credential(account_id, &credential).map_err(|e| {
        log_store_operation("update_credential", account_id, false, Some(&e.to_string()));
        ConfirmError::Integrity(format!("credential write failed: {}", e))
    })?;

    store.mark_confirmed(account_id).map_err(|e| {
        log_store_operation("mark_confirmed", account_id, false, Some(&e.to_string()));
        ConfirmError::Integrity(format!("confirmed flag write failed: {}", e))
    })?;

    // Notify last; the new credential is already in place
    mailer
        .send(
            &account.email,
            templates::WELCOME_SUBJECT,
            &templates::welcome_body(&temporary_password),
        )
        .map_err(ConfirmError::Mail)?;

    log_auth_event("confirm", account_id, true, None);
    Ok(ConfirmOutcome::Confirmed)
}
