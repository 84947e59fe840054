use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// One logged meal, as read back from the `entries` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MealEntry {
    pub id: i64,
    pub username: String,
    pub meal_name: String,
    pub calories: i64,
    /// NULL for rows written before timestamps were recorded.
    pub logged_at: Option<OffsetDateTime>,
}
