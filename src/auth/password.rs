use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::error;

use crate::config::PasswordScheme;
use crate::error::{AppError, AppResult};

const ARGON2_PREFIX: &str = "$argon2";

/// Unsalted SHA-256 of the password as lowercase hex. This is the format
/// older tracker files hold; it is kept readable, not recommended.
pub fn sha256_hex(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

pub fn hash_password(scheme: PasswordScheme, plain: &str) -> AppResult<String> {
    match scheme {
        PasswordScheme::Sha256 => Ok(sha256_hex(plain)),
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(plain.as_bytes(), &salt)
                .map_err(|e| {
                    error!(error = %e, "argon2 hash_password error");
                    AppError::PasswordHash(e.to_string())
                })?
                .to_string();
            Ok(hash)
        }
    }
}

/// Checks `plain` against a stored digest in either supported format.
pub fn verify_password(plain: &str, stored: &str) -> AppResult<bool> {
    if stored.starts_with(ARGON2_PREFIX) {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            AppError::PasswordHash(e.to_string())
        })?;
        return Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok());
    }
    Ok(sha256_hex(plain).as_bytes() == stored.as_bytes())
}
