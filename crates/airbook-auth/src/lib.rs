//! # airbook-auth
//!
//! Credential handling for Airbook.
//!
//! ## Modules
//!
//! - `password` - Argon2id password hashing and policy enforcement
//! - `random` - hex codes drawn from the operating system CSPRNG
//! - `token` - opaque bearer token issue, lookup, validity and revocation

pub mod password;
pub mod random;
pub mod token;

pub use password::{PasswordHasher, PasswordPolicy};
pub use token::{IssuedToken, TokenStore};
