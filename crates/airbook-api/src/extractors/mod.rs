//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthContext, AuthUser};
pub use json::AppJson;
