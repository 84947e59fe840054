use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Digest used when storing the password of a newly registered user.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Unsalted SHA-256, hex encoded. Readable by older tracker files.
    Sha256,
    /// Salted Argon2id PHC string.
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "argon2" => Ok(Self::Argon2),
            other => anyhow::bail!("unknown password scheme `{other}` (expected sha256 or argon2)"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub password_scheme: PasswordScheme,
    pub min_password_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://calorie_tracker.db".into(),
            password_scheme: PasswordScheme::Sha256,
            min_password_len: 4,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        let password_scheme = match std::env::var("PASSWORD_SCHEME") {
            Ok(v) => v.parse().context("PASSWORD_SCHEME")?,
            Err(_) => defaults.password_scheme,
        };
        let min_password_len = match std::env::var("MIN_PASSWORD_LEN") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MIN_PASSWORD_LEN must be a whole number, got `{v}`"))?,
            Err(_) => defaults.min_password_len,
        };
        Ok(Self {
            database_url,
            password_scheme,
            min_password_len,
        })
    }
}
