//! Seat reservation.

pub mod service;

pub use service::ReservationService;
