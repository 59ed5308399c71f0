//! Ticket (inventory item) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable unit with a remaining-seat counter.
///
/// Route, schedule and price are carried as opaque text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub plane_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub departure_hour: Option<String>,
    pub return_hour: Option<String>,
    /// Remaining seats. Never negative.
    pub available_seats: i32,
    pub price: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Whether at least one seat remains.
    pub fn has_capacity(&self) -> bool {
        self.available_seats > 0
    }
}

/// Data required to create a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub plane_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub departure_hour: Option<String>,
    pub return_hour: Option<String>,
    pub available_seats: i32,
    pub price: String,
}

impl CreateTicket {
    /// One-way ticket with the given route and capacity.
    pub fn one_way(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
        available_seats: i32,
        price: impl Into<String>,
    ) -> Self {
        Self {
            plane_id: None,
            origin: origin.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            return_date: None,
            departure_hour: None,
            return_hour: None,
            available_seats,
            price: price.into(),
        }
    }
}
