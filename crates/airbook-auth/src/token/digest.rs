//! Storage key for bearer tokens.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a bearer token. This is what gets persisted and looked up,
/// so a database dump does not contain usable credentials.
pub fn token_digest(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    format!("{hash:x}")
}
