//! Session token entities.

pub mod token;

pub use token::{CreateSessionToken, SessionToken};
