use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,               // row id, referenced by entries.user_id
    pub username: String,      // unique login name
    #[serde(skip_serializing)]
    pub password_hash: String, // sha256 hex or argon2 PHC string
}

/// Identity bound to a session after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for AuthenticatedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
        }
    }
}
