//! Process-local repository implementations.
//!
//! Suitable for tests and single-node development only; all state is lost
//! when the process exits.

pub mod account;
pub mod ticket;
pub mod token;

pub use account::MemoryAccountRepository;
pub use ticket::MemoryTicketRepository;
pub use token::MemorySessionTokenRepository;
