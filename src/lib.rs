pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod exercises;
pub mod meals;
pub mod session;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
