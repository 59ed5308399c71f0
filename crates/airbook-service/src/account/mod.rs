//! Account registration, activation, login and logout.

pub mod service;

pub use service::{AccountService, RegisterInput, Registration};
