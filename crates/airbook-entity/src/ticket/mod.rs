//! Inventory and booking entities.

pub mod booking;
pub mod model;

pub use booking::Booking;
pub use model::{CreateTicket, Ticket};
