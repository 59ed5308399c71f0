//! Inventory handlers.

use axum::Json;
use axum::extract::{Path, State};

use airbook_core::error::AppError;

use crate::dto::response::{BookingResponse, TicketResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state.reservations.ticket(parse_ticket_id(&id)?).await?;
    Ok(Json(TicketResponse { ticket }))
}

/// POST /tickets/{id}/book
pub async fn book_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .reservations
        .book(auth.account_id, parse_ticket_id(&id)?)
        .await?;

    Ok(Json(BookingResponse {
        message: "Ticket booked".to_string(),
        booking,
    }))
}

fn parse_ticket_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid ticket id '{raw}'")))
}
