//! In-memory ticket repository with per-ticket locking.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use airbook_core::error::AppError;
use airbook_core::result::AppResult;
use airbook_entity::ticket::{Booking, CreateTicket, Ticket};

use crate::repositories::TicketRepository;

/// One ticket and the bookings made against it, behind a single lock.
#[derive(Debug)]
struct TicketSlot {
    ticket: Ticket,
    bookings: Vec<Booking>,
}

/// Tickets keyed by id. Each ticket has its own Tokio mutex, so bookings on
/// different tickets never contend.
#[derive(Debug, Clone)]
pub struct MemoryTicketRepository {
    slots: Arc<RwLock<HashMap<i64, Arc<Mutex<TicketSlot>>>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MemoryTicketRepository {
    fn default() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MemoryTicketRepository {
    /// Creates an empty repository. Ticket ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: i64) -> Option<Arc<Mutex<TicketSlot>>> {
        self.slots.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl TicketRepository for MemoryTicketRepository {
    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        if data.available_seats < 0 {
            return Err(AppError::validation("available_seats must not be negative"));
        }

        let now = Utc::now();
        let ticket = Ticket {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            plane_id: data.plane_id,
            origin: data.origin.clone(),
            destination: data.destination.clone(),
            departure_date: data.departure_date.clone(),
            return_date: data.return_date.clone(),
            departure_hour: data.departure_hour.clone(),
            return_hour: data.return_hour.clone(),
            available_seats: data.available_seats,
            price: data.price.clone(),
            created_at: now,
            updated_at: now,
        };

        let slot = TicketSlot {
            ticket: ticket.clone(),
            bookings: Vec::new(),
        };
        self.slots
            .write()
            .await
            .insert(ticket.id, Arc::new(Mutex::new(slot)));
        Ok(ticket)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ticket>> {
        match self.slot(id).await {
            Some(slot) => Ok(Some(slot.lock().await.ticket.clone())),
            None => Ok(None),
        }
    }

    async fn reserve_seat(&self, ticket_id: i64, account_id: Uuid) -> AppResult<Booking> {
        let slot = self
            .slot(ticket_id)
            .await
            .ok_or_else(|| AppError::item_not_found(format!("Ticket {ticket_id} not found")))?;

        // Held across check, decrement and append.
        let mut slot = slot.lock().await;
        if !slot.ticket.has_capacity() {
            return Err(AppError::no_capacity(format!(
                "Ticket {ticket_id} has no remaining seats"
            )));
        }

        let now = Utc::now();
        slot.ticket.available_seats -= 1;
        slot.ticket.updated_at = now;

        let booking = Booking {
            id: Uuid::new_v4(),
            account_id,
            ticket_id,
            created_at: now,
        };
        slot.bookings.push(booking.clone());

        debug!(
            ticket_id,
            booking_id = %booking.id,
            remaining = slot.ticket.available_seats,
            "Seat reserved"
        );
        Ok(booking)
    }

    async fn count_bookings(&self, ticket_id: i64) -> AppResult<i64> {
        match self.slot(ticket_id).await {
            Some(slot) => Ok(slot.lock().await.bookings.len() as i64),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use airbook_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn reserve_decrements_and_records() {
        let repo = MemoryTicketRepository::new();
        let ticket = repo
            .create(&CreateTicket::one_way("LIS", "OPO", "2026-11-02", 2, "49.90"))
            .await
            .unwrap();
        let account = Uuid::new_v4();

        let booking = repo.reserve_seat(ticket.id, account).await.unwrap();
        assert_eq!(booking.ticket_id, ticket.id);
        assert_eq!(booking.account_id, account);

        let stored = repo.find_by_id(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 1);
        assert_eq!(repo.count_bookings(ticket.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_ticket_and_sold_out_write_nothing() {
        let repo = MemoryTicketRepository::new();
        let ticket = repo
            .create(&CreateTicket::one_way("LIS", "FAO", "2026-11-03", 0, "19.00"))
            .await
            .unwrap();

        let err = repo.reserve_seat(999, Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err.kind, ErrorKind::ItemNotFound);

        let err = repo.reserve_seat(ticket.id, Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err.kind, ErrorKind::NoCapacity);

        let stored = repo.find_by_id(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 0);
        assert_eq!(repo.count_bookings(ticket.id).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reservations_never_oversell() {
        let repo = MemoryTicketRepository::new();
        let ticket = repo
            .create(&CreateTicket::one_way("OPO", "MAD", "2026-12-01", 3, "80.00"))
            .await
            .unwrap();

        let attempts = (0..20).map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.reserve_seat(ticket.id, Uuid::new_v4()).await })
        });
        let results = futures::future::join_all(attempts).await;

        let mut granted = 0;
        let mut sold_out = 0;
        for result in results {
            match result.unwrap() {
                Ok(_) => granted += 1,
                Err(e) => {
                    assert_matches!(e.kind, ErrorKind::NoCapacity);
                    sold_out += 1;
                }
            }
        }

        assert_eq!(granted, 3);
        assert_eq!(sold_out, 17);
        let stored = repo.find_by_id(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 0);
        assert_eq!(repo.count_bookings(ticket.id).await.unwrap(), 3);
    }
}
