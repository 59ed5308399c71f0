//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AccountStatus;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address, used as the login identifier.
    pub email: String,
    /// Argon2 PHC string (salt embedded).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Outstanding activation code. Cleared once redeemed.
    #[serde(skip_serializing)]
    pub activation_code: Option<String>,
    /// Whether the account may log in.
    pub active: bool,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Address the registration request came from.
    pub ip_address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Lifecycle state derived from the `active` flag.
    pub fn status(&self) -> AccountStatus {
        if self.active {
            AccountStatus::Active
        } else {
            AccountStatus::Pending
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub activation_code: Option<String>,
    pub active: bool,
    pub ip_address: Option<String>,
}
