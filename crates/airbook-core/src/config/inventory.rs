//! Seed inventory for the memory backend.

use serde::{Deserialize, Serialize};

/// Tickets preloaded when the server runs on the memory backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub tickets: Vec<TicketSeed>,
}

/// One bookable ticket. Route, schedule and price are opaque text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSeed {
    #[serde(default)]
    pub plane_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub departure_hour: Option<String>,
    #[serde(default)]
    pub return_hour: Option<String>,
    pub available_seats: i32,
    pub price: String,
}
