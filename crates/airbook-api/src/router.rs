//! Route definitions for the Airbook HTTP API.
//!
//! Public routes are open; protected routes sit behind the session gate in
//! [`middleware::auth::require_auth`].

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(session_routes())
        .merge(ticket_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(health_routes())
        .merge(account_routes())
        .merge(protected)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health))
}

/// Registration, activation and login
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/activate", post(handlers::auth::activate))
        .route("/login", post(handlers::auth::login))
}

fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", post(handlers::auth::logout))
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/tickets/{id}", get(handlers::ticket::get_ticket))
        .route("/tickets/{id}/book", post(handlers::ticket::book_ticket))
}
