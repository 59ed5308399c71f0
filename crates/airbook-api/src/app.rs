//! Application builder: wires persistence, services and middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use airbook_core::config::{AppConfig, DatabaseBackend};
use airbook_core::result::AppResult;
use airbook_core::traits::SystemClock;
use airbook_database::Repositories;
use airbook_service::{ActivationNotifier, LogNotifier, SmtpNotifier};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Connects persistence and builds the production state.
///
/// The memory backend is seeded from `inventory.tickets`. Activation
/// messages go out over SMTP when email is enabled and are only logged
/// otherwise.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let repositories = Repositories::connect(&config.database).await?;

    if config.database.backend == DatabaseBackend::Memory {
        repositories.seed_tickets(&config.inventory.tickets).await?;
        info!(
            tickets = config.inventory.tickets.len(),
            "Seeded in-memory inventory"
        );
    }

    let notifier: Arc<dyn ActivationNotifier> = if config.email.enabled {
        Arc::new(SmtpNotifier::new(&config.email)?)
    } else {
        Arc::new(LogNotifier)
    };

    Ok(AppState::new(
        config,
        repositories,
        Arc::new(SystemClock),
        notifier,
    ))
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
