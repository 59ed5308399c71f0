//! Account lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an account. `Pending` moves to `Active` only by
/// redeeming the activation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registered, activation code not yet redeemed.
    Pending,
    /// Allowed to log in.
    Active,
}

impl AccountStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
