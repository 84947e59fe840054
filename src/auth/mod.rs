//! Credential store: username and password-digest pairs.

pub mod password;
mod repo;
pub mod repo_types;
pub mod services;

pub use repo_types::{AuthenticatedUser, User};
pub use services::{authenticate, register};
