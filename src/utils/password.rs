//! Password hashing and policy checks.
//!
//! Hashes are Argon2id PHC strings with a random salt per hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;
use validator::ValidationError;

use crate::error::AppError;

/// Characters that satisfy the "symbol" requirement of the password policy.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*?_";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;

/// Hashes a password with Argon2id and a freshly generated salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::internal("Failed to hash password", json!({}))
        })
}

/// Verifies a password against a stored PHC hash.
///
/// A hash that cannot be parsed is logged and treated as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// `validator` custom rule: 8-16 characters containing at least one letter,
/// one digit and one of [`PASSWORD_SYMBOLS`].
pub fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) && has_letter && has_digit && has_symbol
    {
        return Ok(());
    }

    let mut err = ValidationError::new("password_policy");
    err.message = Some(
        "Password length should be 8 ~ 16, and must contain at least 1 letter, digit, and symbol."
            .into(),
    );
    Err(err)
}
