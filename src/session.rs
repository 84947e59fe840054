//! Who is logged in, and which actions that allows.
//!
//! A `Session` is an ordinary value owned by the console loop. It starts
//! anonymous, becomes bound to one user on a successful login and returns to
//! anonymous on logout. Registration never binds a user.

use tracing::{info, warn};

use crate::auth::{self, AuthenticatedUser, User};
use crate::error::{AppError, AppResult};
use crate::exercises::{self, ExerciseSuggestion};
use crate::meals::{self, MealLog};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(AuthenticatedUser),
}

pub struct Session {
    app: AppState,
    state: SessionState,
}

impl Session {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&AuthenticatedUser> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    fn require_user(&self) -> AppResult<&AuthenticatedUser> {
        self.current_user().ok_or(AppError::NotAuthenticated)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> AppResult<&AuthenticatedUser> {
        if let Some(user) = self.current_user() {
            return Err(AppError::invalid_input(format!(
                "Already logged in as {}. Log out first.",
                user.username
            )));
        }
        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return Err(AppError::invalid_input(
                "Please enter both username and password.",
            ));
        }

        let user = auth::authenticate(&self.app, username, password).await?;
        self.state = SessionState::Authenticated(user);
        self.require_user()
    }

    /// Form fields arrive untrimmed; the store keeps exactly what is passed.
    pub async fn register(&mut self, username: &str, password: &str) -> AppResult<User> {
        auth::register(&self.app, username.trim(), password.trim()).await
    }

    /// Stores the meal for the bound user and returns the refreshed log.
    pub async fn submit_meal(&mut self, meal_name: &str, calories: &str) -> AppResult<MealLog> {
        let username = self.require_user()?.username.clone();
        if meal_name.trim().is_empty() {
            warn!(%username, "empty meal name");
            return Err(AppError::invalid_input(
                "Please fill in both the meal and calorie fields.",
            ));
        }
        let calories = meals::parse_calories(calories).inspect_err(|_| {
            warn!(%username, "rejected calorie input");
        })?;
        meals::add_meal(&self.app, &username, meal_name, calories).await?;
        meals::meal_log(&self.app, &username).await
    }

    pub async fn meal_log(&self) -> AppResult<MealLog> {
        let user = self.require_user()?;
        meals::meal_log(&self.app, &user.username).await
    }

    pub fn view_exercises(&self) -> AppResult<&'static [ExerciseSuggestion]> {
        self.require_user()?;
        Ok(exercises::list_suggestions())
    }

    /// Unbinds the user. Stored data is left untouched.
    pub fn logout(&mut self) -> Option<AuthenticatedUser> {
        match std::mem::replace(&mut self.state, SessionState::Anonymous) {
            SessionState::Authenticated(user) => {
                info!(user_id = user.id, username = %user.username, "user logged out");
                Some(user)
            }
            SessionState::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn session() -> Session {
        Session::new(AppState::in_memory().await)
    }

    #[tokio::test]
    async fn starts_anonymous() {
        let s = session().await;
        assert_eq!(s.state(), &SessionState::Anonymous);
        assert!(matches!(s.meal_log().await, Err(AppError::NotAuthenticated)));
        assert!(matches!(s.view_exercises(), Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn register_does_not_log_in() {
        let mut s = session().await;
        s.register("alice", "pw123").await.unwrap();
        assert!(s.current_user().is_none());
        let err = s.submit_meal("Oatmeal", "300").await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
    }

    #[tokio::test]
    async fn failed_login_stays_anonymous() {
        let mut s = session().await;
        s.register("alice", "pw123").await.unwrap();
        let err = s.login("alice", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(s.state(), &SessionState::Anonymous);
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let mut s = session().await;
        for (u, p) in [("", "pw123"), ("alice", ""), ("  ", "  ")] {
            let err = s.login(u, p).await.unwrap_err();
            assert_eq!(err.to_string(), "Please enter both username and password.");
        }
    }

    #[tokio::test]
    async fn full_flow_add_view_logout() {
        let mut s = session().await;
        s.register("alice", "pw123").await.unwrap();
        let user = s.login("alice", "pw123").await.unwrap();
        assert_eq!(user.username, "alice");

        let log = s.submit_meal("Oatmeal", "300").await.unwrap();
        assert_eq!(log.total, 300);
        let log = s.submit_meal("Coffee", " 5 ").await.unwrap();
        assert_eq!(log.total, 305);
        let listed: Vec<_> = log
            .entries
            .iter()
            .map(|e| (e.meal_name.as_str(), e.calories))
            .collect();
        assert_eq!(listed, vec![("Oatmeal", 300), ("Coffee", 5)]);

        assert_eq!(s.view_exercises().unwrap().len(), 6);

        let gone = s.logout().unwrap();
        assert_eq!(gone.username, "alice");
        assert!(s.logout().is_none());

        // data survives logout
        s.login("alice", "pw123").await.unwrap();
        assert_eq!(s.meal_log().await.unwrap().total, 305);
    }

    #[tokio::test]
    async fn bad_meal_input_leaves_log_unchanged() {
        let mut s = session().await;
        s.register("alice", "pw123").await.unwrap();
        s.login("alice", "pw123").await.unwrap();
        s.submit_meal("Apple", "95").await.unwrap();

        for (meal, cal) in [("", "100"), ("Snack", "-5"), ("Snack", "lots"), ("Snack", "")] {
            let err = s.submit_meal(meal, cal).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{meal:?}/{cal:?} gave {err:?}");
        }
        let log = s.meal_log().await.unwrap();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.total, 95);
    }

    #[tokio::test]
    async fn form_input_is_trimmed() {
        let mut s = session().await;
        s.register("  alice ", " pw123 ").await.unwrap();
        let user = s.login(" alice", "pw123\t").await.unwrap();
        assert_eq!(user.username, "alice");
        s.logout();

        let err = s.register("alice", "pw999").await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn second_login_requires_logout() {
        let mut s = session().await;
        s.register("alice", "pw123").await.unwrap();
        s.register("bob", "pw456").await.unwrap();
        s.login("alice", "pw123").await.unwrap();
        let err = s.login("bob", "pw456").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(s.current_user().unwrap().username, "alice");
    }
}
