//! Activation email configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// SMTP delivery settings for activation messages.
///
/// When `enabled` is false the server logs that an activation message would
/// have been sent instead of contacting a mail relay.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default)]
    pub sender_address: String,
    /// Link prefix; the activation code is appended as `?code=<code>`.
    #[serde(default = "default_activation_base_url")]
    pub activation_base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            sender_name: default_sender_name(),
            sender_address: String::new(),
            activation_base_url: default_activation_base_url(),
        }
    }
}

impl EmailConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if !self.enabled {
            return Ok(());
        }
        if self.smtp_host.is_empty() {
            return Err(AppError::configuration(
                "email.smtp_host is required when email is enabled",
            ));
        }
        if self.sender_address.is_empty() {
            return Err(AppError::configuration(
                "email.sender_address is required when email is enabled",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "****"))
            .field("sender_name", &self.sender_name)
            .field("sender_address", &self.sender_address)
            .field("activation_base_url", &self.activation_base_url)
            .finish()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender_name() -> String {
    "Airbook".to_string()
}

fn default_activation_base_url() -> String {
    "http://localhost:8080/activate".to_string()
}
