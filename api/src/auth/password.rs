//! # Password hashing and verification — Argon2id
//!
//! - [`hash_password`] — generates a random salt via `OsRng`, hashes the
//!   plaintext password with the default Argon2id parameters, and returns
//!   the result as a PHC-format string (e.g.
//!   `$argon2id$v=19$m=19456,t=2,p=1$...`). This string is stored in the
//!   `password_hash` column of the `users` table.
//!
//! - [`verify_password`] — parses a PHC-format hash and checks whether the
//!   provided plaintext matches. Returns `Ok(true)` on success, `Ok(false)`
//!   on mismatch, or `Err` if the stored hash is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use anyhow::anyhow;

use crate::error::ApiError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("asdasd123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("asdasd123", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("asdasd123", "not-a-phc-string").is_err());
    }
}
