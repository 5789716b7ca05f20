//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Length rules are enforced by request validation before a password reaches
//! this module; seeded accounts (for instance the default `admin` account)
//! use short passwords on purpose.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Hash that no submitted password is expected to match.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash a password using the Argon2 algorithm.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PwdHash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// Returns `Ok(false)` for a mismatch and `Err` only when the stored hash
/// cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::PwdHashParse(e.to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Verify `password` against a fixed throwaway hash.
///
/// Login calls this when no account matches the email, so an unknown email
/// costs the same Argon2 work as a wrong password. Always returns `false`.
pub fn verify_dummy(password: &str) -> bool {
    let hash = DUMMY_HASH.get_or_init(|| hash_password("dummy-password-for-unknown-accounts").ok());

    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}
