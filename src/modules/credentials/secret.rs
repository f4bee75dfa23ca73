use rand::distributions::Uniform;
use rand::rngs::OsRng;
use rand::Rng;

/// Alphabet for generated secrets: 62 alphanumeric symbols.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
/// Length of a generated temporary password.
const SECRET_LENGTH: usize = 8;

/// Function to generate a temporary password for a freshly confirmed account.
///
/// Drawn from the OS random source since this value is mailed to the user as
/// a real, working password.
pub fn generate_temporary_secret() -> String {
    random_alphanumeric(SECRET_LENGTH)
}

/// Function to generate a random alphanumeric string of the given length.
///
/// Each character is sampled independently and uniformly over the full
/// 62-symbol alphabet. Also used for confirmation tokens and security stamps.
pub fn random_alphanumeric(length: usize) -> String {
    OsRng
        .sample_iter(&Uniform::new(0, ALPHABET.len()))
        .take(length)
        .map(|i| ALPHABET[i] as char)
        .collect()
}
