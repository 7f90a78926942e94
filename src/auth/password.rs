//! Password hashing and verification using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("invalid password hash: {0}")]
    BadHash(String),
    #[error("password verification error: {0}")]
    Verify(String),
}

/// Hash a plaintext password with a fresh random salt.
///
/// Cost parameters are the library defaults, fixed by the server build —
/// never caller-controlled.
///
/// # Errors
///
/// Returns an error if hashing fails (effectively only on RNG failure).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordError::Hash(err.to_string()))
}

/// Verify a plaintext password against a PHC-format Argon2id hash.
///
/// Returns `Ok(false)` on a mismatch; a malformed stored hash is an error,
/// not a mismatch.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or verification
/// fails for a reason other than a wrong password.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|err| PasswordError::BadHash(err.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordError::Verify(err.to_string())),
    }
}
