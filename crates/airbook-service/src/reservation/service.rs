//! Seat reservation against shared inventory.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use airbook_core::error::{AppError, ErrorKind};
use airbook_database::repositories::TicketRepository;
use airbook_entity::ticket::{Booking, Ticket};

/// Books seats. The check-decrement-record step is delegated to
/// [`TicketRepository::reserve_seat`], which serializes it per ticket.
#[derive(Debug, Clone)]
pub struct ReservationService {
    tickets: Arc<dyn TicketRepository>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// Reserves one seat on `ticket_id` for `account_id`.
    pub async fn book(&self, account_id: Uuid, ticket_id: i64) -> Result<Booking, AppError> {
        match self.tickets.reserve_seat(ticket_id, account_id).await {
            Ok(booking) => {
                info!(
                    account_id = %account_id,
                    ticket_id,
                    booking_id = %booking.id,
                    "Ticket booked"
                );
                Ok(booking)
            }
            Err(e) if e.kind == ErrorKind::NoCapacity => {
                warn!(account_id = %account_id, ticket_id, "Booking refused: sold out");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Looks up a ticket and its remaining seats.
    pub async fn ticket(&self, ticket_id: i64) -> Result<Ticket, AppError> {
        self.tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::item_not_found(format!("Ticket {ticket_id} not found")))
    }
}
