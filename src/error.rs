use thiserror::Error;

/// Failures a user action can end in. Every variant is reported back to the
/// console; none of them terminate the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already exists. Please choose a different one.")]
    UsernameTaken,

    /// Unknown username and wrong password are deliberately indistinguishable.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("No such user: {0}")]
    UnknownUser(String),

    #[error("Please log in first.")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
