use std::fmt;

use serde::Deserialize;

use crate::modules::confirmation::handshake::{run_confirmation, ConfirmError, ConfirmOutcome};
use crate::modules::confirmation::tokens::{TokenError, TokenIssuer};
use crate::modules::credentials::{create_credential, verify_credential, CredentialError};
use crate::modules::email::templates;
use crate::modules::email::Mailer;
use crate::modules::utils::logging::{log_auth_event, log_store_operation};
use crate::modules::utils::validate::{is_valid_email, require_field};

use super::store::{Account, AccountStore, StoreError};

/// Statically validated registration request. Replaces per-field probing of a
/// dynamic payload: validation runs once, over the whole struct.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub rank: u32,
    pub department: String,
    pub user_type: String,
    pub status: String,
    pub email: String,
    /// Admin-supplied initial secret; replaced by the confirmation handshake.
    pub initial_secret: String,
}

impl NewAccount {
    /// Collect every validation error at once
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require_field(&self.username, "username", &mut errors);
        require_field(&self.first_name, "firstName", &mut errors);
        require_field(&self.last_name, "lastName", &mut errors);
        if self.rank == 0 {
            errors.push("rank is required".to_string());
        }
        require_field(&self.department, "department", &mut errors);
        require_field(&self.user_type, "userType", &mut errors);
        require_field(&self.status, "userStatus", &mut errors);
        if !is_valid_email(self.email.trim()) {
            errors.push("email is required".to_string());
        }
        require_field(&self.initial_secret, "initialSecret", &mut errors);
        errors
    }
}

/// Errors from account service operations
#[derive(Debug, PartialEq)]
pub enum AccountError {
    Validation(Vec<String>),
    UsernameTaken,
    Store(StoreError),
    Token(TokenError),
    Mail(String),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Validation(errors) => write!(f, "invalid request: {}", errors.join(", ")),
            AccountError::UsernameTaken => write!(f, "username already exists"),
            AccountError::Store(e) => write!(f, "store failure: {}", e),
            AccountError::Token(e) => write!(f, "token issue failure: {}", e),
            AccountError::Mail(details) => write!(f, "mail failure: {}", details),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists => AccountError::UsernameTaken,
            other => AccountError::Store(other),
        }
    }
}

impl From<TokenError> for AccountError {
    fn from(e: TokenError) -> Self {
        AccountError::Token(e)
    }
}

impl From<CredentialError> for AccountError {
    fn from(_: CredentialError) -> Self {
        AccountError::Validation(vec!["initialSecret is required".to_string()])
    }
}

/// Outcome of an authentication attempt
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(Account),
    /// Unknown username and wrong password are deliberately the same outcome.
    InvalidCredentials,
    /// Credentials verified but the status tag is not "active".
    Inactive,
}

/// Orchestrates account registration, confirmation, and credential changes
/// over the store, token, and mail capabilities.
pub struct AccountService<S, T, M> {
    store: S,
    tokens: T,
    mailer: M,
    // Base URL the confirmation link points back at, e.g.
    // "https://host/api/account/confirm"
    confirm_url_base: String,
}

impl<S, T, M> AccountService<S, T, M>
where
    S: AccountStore,
    T: TokenIssuer,
    M: Mailer,
{
    pub fn new(store: S, tokens: T, mailer: M, confirm_url_base: impl Into<String>) -> Self {
        Self {
            store,
            tokens,
            mailer,
            confirm_url_base: confirm_url_base.into(),
        }
    }

    /// Register a new pending account and dispatch its confirmation email.
    ///
    /// The account is persisted before the email goes out, so a mail failure
    /// leaves a pending account whose confirmation can be re-sent; the error
    /// still surfaces to the caller.
    pub fn register(&self, request: NewAccount) -> Result<Account, AccountError> {
        let errors = request.validate();
        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }

        match self.store.fetch_by_username(&request.username) {
            Ok(_) => return Err(AccountError::UsernameTaken),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(AccountError::Store(e)),
        }

        let credential = create_credential(&request.initial_secret)?;
        let mut account = Account::new(
            &request.username,
            &request.email,
            &request.status,
            credential,
        );
        account.first_name = request.first_name.trim().to_string();
        account.middle_name = request.middle_name.trim().to_string();
        account.last_name = request.last_name.trim().to_string();
        account.rank = request.rank;
        account.department = request.department.trim().to_string();
        account.user_type = request.user_type.trim().to_string();

        self.store.insert(account.clone())?;
        log_store_operation("register", &account.id, true, None);

        let token = self.tokens.issue(&account.id)?;
        let link = format!(
            "{}?userid={}&token={}",
            self.confirm_url_base, account.id, token
        );
        self.mailer
            .send(
                &account.email,
                templates::CONFIRM_SUBJECT,
                &templates::confirmation_body(&link),
            )
            .map_err(AccountError::Mail)?;

        Ok(account)
    }

    /// Run the email-confirmation handshake for the account.
    pub fn confirm(&self, account_id: &str, token: &str) -> Result<ConfirmOutcome, ConfirmError> {
        run_confirmation(&self.store, &self.tokens, &self.mailer, account_id, token)
    }

    /// Check a username/password pair and the account's status gate.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, StoreError> {
        let account = match self.store.fetch_by_username(username) {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                log_auth_event("login", username, false, Some("unknown username"));
                return Ok(AuthOutcome::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !verify_credential(password, &account.credential) {
            log_auth_event("login", username, false, Some("bad password"));
            return Ok(AuthOutcome::InvalidCredentials);
        }

        if !account.is_active() {
            log_auth_event("login", username, false, Some("account not active"));
            return Ok(AuthOutcome::Inactive);
        }

        log_auth_event("login", username, true, None);
        Ok(AuthOutcome::Authenticated(account))
    }

    /// Replace the account's credential with one derived from the new secret.
    pub fn change_password(&self, account_id: &str, new_secret: &str) -> Result<(), AccountError> {
        let credential = create_credential(new_secret)
            .map_err(|_| AccountError::Validation(vec!["password is required".to_string()]))?;
        self.store.update_credential(account_id, &credential)?;
        log_store_operation("change_password", account_id, true, None);
        Ok(())
    }

    /// Update the account's status tag.
    pub fn change_status(&self, account_id: &str, status: &str) -> Result<(), AccountError> {
        let mut errors = Vec::new();
        require_field(status, "userStatus", &mut errors);
        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }
        self.store.update_status(account_id, status.trim())?;
        log_store_operation("change_status", account_id, true, None);
        Ok(())
    }
}
