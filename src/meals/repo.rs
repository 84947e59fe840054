use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::meals::repo_types::MealEntry;

/// Appends an entry for `username`. `None` when no such user exists.
pub async fn insert(
    db: &SqlitePool,
    username: &str,
    meal_name: &str,
    calories: i64,
    logged_at: OffsetDateTime,
) -> sqlx::Result<Option<MealEntry>> {
    let row = sqlx::query_as::<_, (i64,)>(
        r#"
        INSERT INTO entries (user_id, meal, calories, logged_at)
        SELECT id, ?, ?, ? FROM users WHERE username = ?
        RETURNING id
        "#,
    )
    .bind(meal_name)
    .bind(calories)
    .bind(logged_at)
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(row.map(|(id,)| MealEntry {
        id,
        username: username.to_owned(),
        meal_name: meal_name.to_owned(),
        calories,
        logged_at: Some(logged_at),
    }))
}

/// All entries for `username`, oldest first.
pub async fn list_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Vec<MealEntry>> {
    sqlx::query_as::<_, MealEntry>(
        r#"
        SELECT e.id, u.username, e.meal AS meal_name, e.calories, e.logged_at
        FROM entries e
        JOIN users u ON u.id = e.user_id
        WHERE u.username = ?
        ORDER BY e.id ASC
        "#,
    )
    .bind(username)
    .fetch_all(db)
    .await
}
