//! Booking entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One reserved seat. Created exactly once per successful booking and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub account_id: Uuid,
    pub ticket_id: i64,
    pub created_at: DateTime<Utc>,
}
