//! Account domain entities.

pub mod model;
pub mod status;

pub use model::{Account, CreateAccount};
pub use status::AccountStatus;
