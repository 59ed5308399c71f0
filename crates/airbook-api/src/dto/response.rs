//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use airbook_entity::account::AccountStatus;
use airbook_entity::ticket::{Booking, Ticket};

/// Generic message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub account_id: Uuid,
    pub status: AccountStatus,
    /// Set when the activation message could not be delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Issued session token and its validity window.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub start: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub booking: Booking,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}
