//! Activation message delivery.

pub mod notifier;
pub mod smtp;

pub use notifier::{ActivationNotifier, LogNotifier};
pub use smtp::SmtpNotifier;
