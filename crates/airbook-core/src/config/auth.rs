//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest accepted session token size, in random bytes (256 bits).
pub const MIN_TOKEN_BYTES: usize = 32;

/// Smallest accepted activation code size, in random bytes (128 bits).
pub const MIN_ACTIVATION_CODE_BYTES: usize = 16;

/// Longest accepted session token lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

/// Credential and session token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an issued session token in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// Random bytes per session token before hex encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Random bytes per activation code before hex encoding.
    #[serde(default = "default_activation_code_bytes")]
    pub activation_code_bytes: usize,
    /// New accounts start pending and must redeem an activation code.
    /// Needs email delivery to be enabled.
    #[serde(default = "default_require_activation")]
    pub require_activation: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_token_ttl(),
            token_bytes: default_token_bytes(),
            activation_code_bytes: default_activation_code_bytes(),
            require_activation: default_require_activation(),
            password_min_length: default_password_min_length(),
        }
    }
}

impl AuthConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        if self.token_bytes < MIN_TOKEN_BYTES {
            return Err(AppError::configuration(format!(
                "auth.token_bytes must be at least {MIN_TOKEN_BYTES}"
            )));
        }
        if self.activation_code_bytes < MIN_ACTIVATION_CODE_BYTES {
            return Err(AppError::configuration(format!(
                "auth.activation_code_bytes must be at least {MIN_ACTIVATION_CODE_BYTES}"
            )));
        }
        if self.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    1440
}

fn default_token_bytes() -> usize {
    MIN_TOKEN_BYTES
}

fn default_activation_code_bytes() -> usize {
    32
}

fn default_require_activation() -> bool {
    false
}

fn default_password_min_length() -> usize {
    6
}
