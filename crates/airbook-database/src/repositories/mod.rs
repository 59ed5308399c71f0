//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only; the concrete backend is chosen at
//! start-up (see [`crate::backend::Repositories`]).

pub mod account;
pub mod ticket;
pub mod token;

pub use account::{AccountRepository, PgAccountRepository};
pub use ticket::{PgTicketRepository, TicketRepository};
pub use token::{PgSessionTokenRepository, SessionTokenRepository};
