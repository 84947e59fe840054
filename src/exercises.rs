//! Exercise catalog shown beside the meal log.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExerciseSuggestion {
    pub name: &'static str,
    /// Estimated kcal burned per session.
    pub calories_burned: u32,
}

const CATALOG: [ExerciseSuggestion; 6] = [
    ExerciseSuggestion { name: "Walk 30 min", calories_burned: 150 },
    ExerciseSuggestion { name: "1 hour Strength Training", calories_burned: 300 },
    ExerciseSuggestion { name: "20 min HIIT", calories_burned: 250 },
    ExerciseSuggestion { name: "Yoga or Stretching", calories_burned: 80 },
    ExerciseSuggestion { name: "Running 5k", calories_burned: 400 },
    ExerciseSuggestion { name: "Cycling (Moderate)", calories_burned: 350 },
];

pub const TIP: &str = "Tip: Consistency is key!";

pub fn list_suggestions() -> &'static [ExerciseSuggestion] {
    &CATALOG
}
