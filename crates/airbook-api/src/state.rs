//! Shared application state passed to all handlers via Axum's State extractor.

use std::sync::Arc;

use airbook_auth::{PasswordHasher, TokenStore};
use airbook_core::config::AppConfig;
use airbook_core::traits::Clock;
use airbook_database::Repositories;
use airbook_service::{AccountService, ActivationNotifier, ReservationService};

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Persistence capability.
    pub repositories: Repositories,
    /// Session token issue and lookup.
    pub tokens: Arc<TokenStore>,
    /// Registration, activation, login and logout.
    pub accounts: Arc<AccountService>,
    /// Seat booking.
    pub reservations: Arc<ReservationService>,
}

impl AppState {
    /// Wires the services on top of the given persistence, clock and notifier.
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ActivationNotifier>,
    ) -> Self {
        let tokens = Arc::new(TokenStore::new(
            repositories.tokens.clone(),
            clock,
            &config.auth,
        ));
        let accounts = Arc::new(AccountService::new(
            repositories.accounts.clone(),
            tokens.clone(),
            PasswordHasher::new(),
            notifier,
            config.auth.clone(),
        ));
        let reservations = Arc::new(ReservationService::new(repositories.tickets.clone()));

        Self {
            config: Arc::new(config),
            repositories,
            tokens,
            accounts,
            reservations,
        }
    }
}
