//! Session token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted bearer token with its validity window.
///
/// Only the SHA-256 digest of the bearer string is stored; the plaintext is
/// handed to the client once at login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionToken {
    /// Row identifier. Safe to log.
    pub id: Uuid,
    /// Owning account.
    pub account_id: Uuid,
    /// Hex SHA-256 digest of the bearer string.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// First instant the token is accepted.
    pub starting_date: DateTime<Utc>,
    /// Last instant the token is accepted.
    pub ending_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionToken {
    /// Whether `now` lies within `[starting_date, ending_date]`, bounds inclusive.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.starting_date <= now && now <= self.ending_date
    }
}

/// Data required to persist a newly issued token.
#[derive(Debug, Clone)]
pub struct CreateSessionToken {
    pub account_id: Uuid,
    pub token_hash: String,
    pub starting_date: DateTime<Utc>,
    pub ending_date: DateTime<Utc>,
}
