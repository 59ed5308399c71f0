//! # airbook-database
//!
//! Persistence capability for Airbook: repository traits, their
//! PostgreSQL implementations, process-local implementations for tests and
//! development, connection pool management and migrations.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use backend::Repositories;
pub use connection::DatabasePool;
