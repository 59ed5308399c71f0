//! Session gate for protected routes.
//!
//! Reads the bearer token, resolves it, and checks its validity window
//! against the token store's clock. Admitted requests carry an
//! [`AuthContext`] in their extensions.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error};

use airbook_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthContext;
use crate::state::AppState;

const BEARER_PREFIX: &str = "bearer ";

/// Rejects requests without a token whose window contains the current instant.
///
/// A token that cannot be resolved is reported as an auth backend failure.
/// A token that resolves but is expired, revoked or not yet started is
/// unauthenticated.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::unauthenticated("Missing bearer token"))?
        .to_string();

    let record = match state.tokens.resolve(&token).await {
        Ok(record) => record,
        Err(e) => {
            error!(error_code = e.kind.code(), error = %e.message, "Token resolution failed");
            return Err(AppError::auth_backend("Session token could not be resolved").into());
        }
    };

    if !state.tokens.is_valid(&record) {
        debug!(token_id = %record.id, "Session token outside its validity window");
        return Err(AppError::unauthenticated("Session token is expired or revoked").into());
    }

    request.extensions_mut().insert(AuthContext {
        account_id: record.account_id,
        token_id: record.id,
        token,
    });

    Ok(next.run(request).await)
}

/// Token from the `Authorization` header. The `Bearer ` prefix is optional and
/// matched case-insensitively; a bare token is accepted as-is.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();

    if value.eq_ignore_ascii_case(BEARER_PREFIX.trim_end()) {
        return None;
    }

    let token = match value.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
            value[BEARER_PREFIX.len()..].trim()
        }
        _ => value,
    };

    (!token.is_empty()).then_some(token)
}
