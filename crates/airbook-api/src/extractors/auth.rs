//! `AuthUser` extractor: exposes the session admitted by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use airbook_core::error::AppError;

use crate::error::ApiError;

/// The session a request was admitted with.
#[derive(Clone)]
pub struct AuthContext {
    /// Owner of the session.
    pub account_id: Uuid,
    /// Row id of the session token, safe to log.
    pub token_id: Uuid,
    /// The bearer string as presented. Needed by logout.
    pub token: String,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("account_id", &self.account_id)
            .field("token_id", &self.token_id)
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Extracted authenticated session available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthenticated("Authentication required").into())
    }
}
