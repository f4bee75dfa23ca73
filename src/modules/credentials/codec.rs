use base64::{engine::general_purpose::STANDARD as base64, Engine as _};
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

use crate::HmacSha256;

/// Number of random bytes in a per-credential salt.
const SALT_SIZE: usize = 8;
/// PBKDF2 rounds. Fixed constant: changing it invalidates every stored
/// credential, so a different value requires a versioned credential format.
const NUM_ITERATIONS: u32 = 6000;
/// Length of the derived hash in bytes.
const HASH_SIZE: usize = 32;
/// Separator between the hash part and the salt part of a stored credential.
const DELIMITER: char = ':';

/// Errors from credential creation
#[derive(Debug, PartialEq)]
pub enum CredentialError {
    EmptySecret,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::EmptySecret => write!(f, "secret is empty after trimming"),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Function to derive a stored credential from a plaintext secret.
///
/// The secret is trimmed before derivation so surrounding whitespace never
/// affects the result. A fresh random salt is drawn on every call, so two
/// identical secrets produce unlinkable credentials. The returned string is
/// `base64(hash) + ":" + base64(salt)`.
pub fn create_credential(secret: &str) -> Result<String, CredentialError> {
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(CredentialError::EmptySecret);
    }

    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    Ok(format!(
        "{}{}{}",
        derive_hash(secret, &salt),
        DELIMITER,
        base64.encode(salt)
    ))
}

/// Function to verify a plaintext secret against a stored credential.
///
/// Any credential that does not parse as exactly two non-empty delimited
/// parts with a base64 salt verifies as false. Malformed storage is
/// indistinguishable from a wrong password on purpose.
pub fn verify_credential(secret: &str, credential: &str) -> bool {
    let parts: Vec<&str> = credential.split(DELIMITER).collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return false;
    }

    let salt = match base64.decode(parts[1]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    derive_hash(secret.trim(), &salt) == parts[0]
}

// Run PBKDF2-HMAC-SHA256 over the secret with the given salt and encode the
// derived hash. Deterministic given (secret, salt).
fn derive_hash(secret: &str, salt: &[u8]) -> String {
    let mut hash = [0u8; HASH_SIZE];
    pbkdf2::<HmacSha256>(secret.as_bytes(), salt, NUM_ITERATIONS, &mut hash);
    base64.encode(hash)
}
