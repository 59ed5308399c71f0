//! # airbook-entity
//!
//! Domain entity models for Airbook. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod account;
pub mod session;
pub mod ticket;
