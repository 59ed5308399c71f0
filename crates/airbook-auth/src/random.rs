//! Hex codes drawn from the operating system CSPRNG.
//!
//! Used for bearer tokens and activation codes. There is no fallback to a
//! weaker generator: if the OS source fails, the operation fails.

use argon2::password_hash::rand_core::{OsRng, RngCore};

use airbook_core::error::AppError;

/// Generates `bytes` random bytes and returns them lowercase hex encoded
/// (`2 * bytes` characters).
pub fn generate_hex_code(bytes: usize) -> Result<String, AppError> {
    let mut buf = vec![0u8; bytes];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| AppError::internal(format!("Secure random source unavailable: {e}")))?;

    Ok(buf.iter().map(|b| format!("{b:02x}")).collect())
}
