//! Random password generation and Argon2 hashing for user accounts.
//!
//! Both generation and hashing take the random source as a parameter so that
//! callers (and tests) decide where the entropy comes from.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use thiserror::Error;
use tracing::{debug, warn};

/// Length used for generated bootstrap passwords.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
pub const PUNCTUATION: &[u8] = br##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Generates a password of `length` characters drawn from ASCII letters,
/// digits and punctuation.
///
/// When `length >= 3` the result contains at least one character of each
/// class.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let alphabet = [LETTERS, DIGITS, PUNCTUATION].concat();
    let mut chars = Vec::with_capacity(length);

    if length >= 3 {
        for class in [LETTERS, DIGITS, PUNCTUATION] {
            chars.push(class[rng.gen_range(0..class.len())]);
        }
    }
    while chars.len() < length {
        chars.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}

/// A password that has been through Argon2.
///
/// The only way to build one is [`HashedPassword::hash`], so anything holding
/// a `HashedPassword` cannot accidentally persist clear text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn hash<R: RngCore + CryptoRng>(
        rng: &mut R,
        plaintext: &str,
    ) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(rng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        debug!("Password hashed with {}", hash.algorithm);
        Ok(Self(hash.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Returns true when `candidate` matches the stored PHC string.
///
/// A stored value that is not a valid PHC string never matches.
pub fn verify_password(candidate: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password is not a valid hash: {}", e);
            false
        }
    }
}
