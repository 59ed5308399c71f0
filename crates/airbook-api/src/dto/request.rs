//! Request DTOs with validation.
//!
//! Bodies carrying passwords deliberately do not implement `Debug`.

use serde::Deserialize;
use validator::Validate;

use airbook_core::error::AppError;

/// Registration request body.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Activation request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivateRequest {
    #[validate(length(min = 1, message = "Activation code is required"))]
    pub code: String,
}

/// Login request body. The identifier is the account's email address.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    #[validate(length(min = 1, message = "Email is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Runs the derived validation rules, mapping failures to `VALIDATION_ERROR`.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
