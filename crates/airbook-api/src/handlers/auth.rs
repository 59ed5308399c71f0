//! Account lifecycle handlers: register, activate, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use airbook_service::RegisterInput;

use crate::dto::request::{ActivateRequest, LoginRequest, RegisterRequest, validate_request};
use crate::dto::response::{LoginResponse, MessageResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AuthUser};
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    validate_request(&req)?;

    let registration = state
        .accounts
        .register(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
            ip_address: client_ip(&headers),
        })
        .await?;

    let message = if registration.account.active {
        "Account created"
    } else {
        "Account created. Check your email to activate it"
    };

    Ok(Json(RegisterResponse {
        message: message.to_string(),
        account_id: registration.account.id,
        status: registration.account.status(),
        warning: registration.notification_warning,
    }))
}

/// POST /activate
pub async fn activate(
    State(state): State<AppState>,
    AppJson(req): AppJson<ActivateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;
    state.accounts.activate(&req.code).await?;
    Ok(Json(MessageResponse::new("Account activated")))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_request(&req)?;
    let issued = state.accounts.login(&req.identifier, &req.password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        start: issued.record.starting_date,
        expiry: issued.record.ending_date,
    }))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts.logout(&auth.token).await?;
    Ok(Json(MessageResponse::new("Logged out")))
}

/// First hop of `X-Forwarded-For`, if present.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
