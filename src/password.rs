//! Salted one-way password hashing.
//!
//! Registration hashes through the [`PasswordHasher`] held in the application
//! state; the stored value is a PHC string that carries its own salt and
//! parameters, so verification needs nothing but the hash.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
};
use rand::RngCore;

use crate::error::AppError;

/// Password hasher trait
///
/// Implementations must salt every hash independently: hashing the same
/// password twice yields two different strings that both verify.
pub trait PasswordHasher: Send + Sync + fmt::Debug {
    /// Hashes a plaintext password into a self-describing hash string.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Returns `Ok(true)` if `password` matches `hash`, `Ok(false)` if it
    /// doesn't, or an error if `hash` cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// Argon2id with the crate's default parameters and a random 16-byte salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AppError::PasswordHash(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::PasswordHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_contains_raw_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("correct horse battery").unwrap();

        assert_ne!(hash, "correct horse battery");
        assert!(!hash.contains("correct horse battery"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_accepts_correct_and_rejects_wrong_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("s3cret-passphrase").unwrap();

        assert!(hasher.verify("s3cret-passphrase", &hash).unwrap());
        assert!(!hasher.verify("s3cret-passphrasE", &hash).unwrap());
        assert!(!hasher.verify("", &hash).unwrap());
    }

    #[test]
    fn test_same_password_is_salted_differently() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("repeat").unwrap();
        let second = hasher.hash("repeat").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("repeat", &first).unwrap());
        assert!(hasher.verify("repeat", &second).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash_is_an_error() {
        let hasher = Argon2Hasher::new();

        assert!(matches!(
            hasher.verify("anything", "not-a-phc-string"),
            Err(AppError::PasswordHash(_))
        ));
    }
}
