//! # airbook-service
//!
//! Business logic for Airbook. Services follow constructor injection: all
//! dependencies are provided at construction time via `Arc` references.

pub mod account;
pub mod notification;
pub mod reservation;

pub use account::{AccountService, RegisterInput, Registration};
pub use notification::{ActivationNotifier, LogNotifier, SmtpNotifier};
pub use reservation::ReservationService;
