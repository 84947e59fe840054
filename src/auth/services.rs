use tracing::{info, instrument, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::{AuthenticatedUser, User};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Creates a user. Does not log the new user in. Both arguments are stored
/// exactly as given; form-level trimming belongs to the caller.
#[instrument(skip(state, password))]
pub async fn register(state: &AppState, username: &str, password: &str) -> AppResult<User> {
    if username.trim().is_empty() {
        warn!("empty username");
        return Err(AppError::invalid_input("Username must not be empty."));
    }

    let min_len = state.config.min_password_len;
    if password.chars().count() < min_len {
        warn!("password too short");
        return Err(AppError::invalid_input(format!(
            "Password must be at least {min_len} characters."
        )));
    }

    if User::find_by_username(&state.db, username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(AppError::UsernameTaken);
    }

    let hash = hash_password(state.config.password_scheme, password)?;

    let user = match User::create(&state.db, username, &hash).await {
        Ok(u) => u,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(%username, "username already registered");
            return Err(AppError::UsernameTaken);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Unknown usernames and wrong passwords both end in `InvalidCredentials`.
/// The password digest must match byte for byte.
#[instrument(skip(state, password))]
pub async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> AppResult<AuthenticatedUser> {
    let Some(user) = User::find_by_username(&state.db, username).await? else {
        warn!(%username, "login unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(%username, user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, %username, "user logged in");
    Ok(user.into())
}
