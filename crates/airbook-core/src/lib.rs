//! # airbook-core
//!
//! Core crate for Airbook. Contains configuration schemas, the clock
//! abstraction used for token validity windows, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Airbook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
