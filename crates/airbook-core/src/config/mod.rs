//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod inventory;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::email::EmailConfig;
pub use self::inventory::{InventoryConfig, TicketSeed};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication and token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Activation email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Seed inventory for the memory backend.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `AIRBOOK_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AIRBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would weaken credentials or cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        self.database.validate()?;
        self.email.validate()?;
        if self.auth.require_activation && !self.email.enabled {
            return Err(AppError::configuration(
                "auth.require_activation needs email.enabled; activation codes would never be delivered",
            ));
        }
        Ok(())
    }
}
