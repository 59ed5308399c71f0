//! Opaque bearer tokens.

pub mod digest;
pub mod store;

pub use digest::token_digest;
pub use store::{IssuedToken, TokenStore};
