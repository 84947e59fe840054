use serde::Serialize;

use crate::meals::repo_types::MealEntry;

/// Quick picks offered by the add-meal form.
pub const COMMON_MEALS: [&str; 8] = [
    "Chicken and Rice",
    "Oatmeal",
    "Protein Shake",
    "Scrambled Eggs",
    "Tuna Salad",
    "Pasta with Sauce",
    "Apple",
    "Banana",
];

/// Resolves a 1-based preset number typed into the meal field.
pub fn common_meal(choice: &str) -> Option<&'static str> {
    let n: usize = choice.trim().parse().ok()?;
    n.checked_sub(1).and_then(|i| COMMON_MEALS.get(i)).copied()
}

/// Everything the dashboard shows for one user, read in one pass so the
/// total always matches the listed entries.
#[derive(Debug, Clone, Serialize)]
pub struct MealLog {
    pub entries: Vec<MealEntry>,
    pub total: i64,
}

impl From<Vec<MealEntry>> for MealLog {
    fn from(entries: Vec<MealEntry>) -> Self {
        // rows written by older builds were not bounded
        let total = entries
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.calories));
        Self { entries, total }
    }
}
