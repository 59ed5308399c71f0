//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use airbook_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler-facing error. Wraps [`AppError`] so it can be turned into a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::DuplicateAccount | ErrorKind::NoCapacity => StatusCode::CONFLICT,
        ErrorKind::InvalidCredentials
        | ErrorKind::AccountNotActivated
        | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::ItemNotFound | ErrorKind::ActivationCodeNotFound => StatusCode::NOT_FOUND,
        ErrorKind::TokenNotFound
        | ErrorKind::AuthBackend
        | ErrorKind::Hashing
        | ErrorKind::Persistence
        | ErrorKind::Notification
        | ErrorKind::Configuration
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // Internal failures keep their detail in the logs only.
        let message = if err.kind.is_internal() {
            tracing::error!(
                error_code = err.kind.code(),
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
            "An internal error occurred".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.code().to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let response = ApiError(AppError::no_capacity("Ticket 7 is sold out")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn gate_failures_have_distinct_statuses() {
        assert_eq!(status_for(ErrorKind::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(ErrorKind::AuthBackend),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credential_failures_share_a_status() {
        assert_eq!(
            status_for(ErrorKind::InvalidCredentials),
            status_for(ErrorKind::AccountNotActivated)
        );
    }
}
