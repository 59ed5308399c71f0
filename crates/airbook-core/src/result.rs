//! Convenience result type alias for Airbook.

use crate::error::AppError;

/// A specialized `Result` type for Airbook operations.
pub type AppResult<T> = Result<T, AppError>;
