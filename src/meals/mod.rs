//! Meal ledger: per-user, append-only calorie entries.

pub mod dto;
mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{common_meal, MealLog, COMMON_MEALS};
pub use repo_types::MealEntry;
pub use services::{add_meal, list_meals, meal_log, parse_calories, total_calories};
