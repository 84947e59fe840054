use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::meals::dto::MealLog;
use crate::meals::repo;
use crate::meals::repo_types::MealEntry;
use crate::state::AppState;

/// Upper bound for a single entry. Keeps every per-user sum far inside `i64`.
pub const MAX_CALORIES: i64 = 100_000;

const CALORIES_MSG: &str = "Calories must be a non-negative whole number.";

fn too_many_calories() -> AppError {
    AppError::invalid_input(format!(
        "Calories per entry must not exceed {MAX_CALORIES}."
    ))
}

/// Parses the calorie field of the add-meal form.
pub fn parse_calories(raw: &str) -> AppResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::invalid_input(
            "Please fill in both the meal and calorie fields.",
        ));
    }
    // digits beyond i64 still count as "too many", not as garbage
    if raw.bytes().all(|b| b.is_ascii_digit()) && raw.parse::<i64>().is_err() {
        return Err(too_many_calories());
    }
    match raw.parse::<i64>() {
        Ok(c) if c > MAX_CALORIES => Err(too_many_calories()),
        Ok(c) if c >= 0 => Ok(c),
        _ => Err(AppError::invalid_input(CALORIES_MSG)),
    }
}

#[instrument(skip(state))]
pub async fn add_meal(
    state: &AppState,
    username: &str,
    meal_name: &str,
    calories: i64,
) -> AppResult<MealEntry> {
    let meal_name = meal_name.trim();
    if meal_name.is_empty() {
        warn!("empty meal name");
        return Err(AppError::invalid_input(
            "Please fill in both the meal and calorie fields.",
        ));
    }
    if calories < 0 {
        warn!(calories, "negative calories");
        return Err(AppError::invalid_input(CALORIES_MSG));
    }
    if calories > MAX_CALORIES {
        warn!(calories, "calories above per-entry limit");
        return Err(too_many_calories());
    }

    let entry = repo::insert(
        &state.db,
        username,
        meal_name,
        calories,
        OffsetDateTime::now_utc(),
    )
    .await?
    .ok_or_else(|| AppError::UnknownUser(username.to_owned()))?;

    info!(entry_id = entry.id, %username, calories, "meal added");
    Ok(entry)
}

#[instrument(skip(state))]
pub async fn list_meals(state: &AppState, username: &str) -> AppResult<Vec<MealEntry>> {
    Ok(repo::list_by_username(&state.db, username).await?)
}

/// Sum over `list_meals`, so it can never drift from what is displayed.
#[instrument(skip(state))]
pub async fn total_calories(state: &AppState, username: &str) -> AppResult<i64> {
    Ok(meal_log(state, username).await?.total)
}

/// Entries plus their sum, both taken from the same read.
pub async fn meal_log(state: &AppState, username: &str) -> AppResult<MealLog> {
    Ok(list_meals(state, username).await?.into())
}
