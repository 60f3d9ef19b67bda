//! Data models for the projectbook API.

pub mod auth;
pub mod project;

pub use auth::TokenResponse;
pub use project::{DeleteResponse, Project, ProjectInput};
