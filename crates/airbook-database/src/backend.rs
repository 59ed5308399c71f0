//! Repository set selection for the configured backend.

use std::sync::Arc;

use tracing::{info, warn};

use airbook_core::config::{DatabaseBackend, DatabaseConfig, TicketSeed};
use airbook_core::result::AppResult;
use airbook_entity::ticket::CreateTicket;

use crate::connection::DatabasePool;
use crate::memory::{MemoryAccountRepository, MemorySessionTokenRepository, MemoryTicketRepository};
use crate::migration::run_migrations;
use crate::repositories::{
    AccountRepository, PgAccountRepository, PgSessionTokenRepository, PgTicketRepository,
    SessionTokenRepository, TicketRepository,
};

/// The persistence capabilities handed to the service layer.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub tokens: Arc<dyn SessionTokenRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the repository set for `config.backend`, connecting and
    /// migrating when it is PostgreSQL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory persistence; all data is lost on shutdown");
                Ok(Self::in_memory())
            }
        }
    }

    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            tokens: Arc::new(PgSessionTokenRepository::new(pool.clone())),
            tickets: Arc::new(PgTicketRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Fresh, empty process-local repositories.
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountRepository::new()),
            tokens: Arc::new(MemorySessionTokenRepository::new()),
            tickets: Arc::new(MemoryTicketRepository::new()),
            pool: None,
        }
    }

    /// Insert seed tickets. Intended for the memory backend.
    pub async fn seed_tickets(&self, seeds: &[TicketSeed]) -> AppResult<()> {
        for seed in seeds {
            let ticket = self
                .tickets
                .create(&CreateTicket {
                    plane_id: seed.plane_id,
                    origin: seed.origin.clone(),
                    destination: seed.destination.clone(),
                    departure_date: seed.departure_date.clone(),
                    return_date: seed.return_date.clone(),
                    departure_hour: seed.departure_hour.clone(),
                    return_hour: seed.return_hour.clone(),
                    available_seats: seed.available_seats,
                    price: seed.price.clone(),
                })
                .await?;
            info!(
                ticket_id = ticket.id,
                seats = ticket.available_seats,
                "Seeded ticket"
            );
        }
        Ok(())
    }

    /// Short status string for the health endpoint.
    pub async fn health(&self) -> &'static str {
        match &self.pool {
            None => "memory",
            Some(db) if db.is_reachable().await => "connected",
            Some(_) => "unavailable",
        }
    }

    /// Close the connection pool, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
