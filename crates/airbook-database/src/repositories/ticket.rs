//! Ticket and booking repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use airbook_core::error::{AppError, ErrorKind};
use airbook_core::result::AppResult;
use airbook_entity::ticket::{Booking, CreateTicket, Ticket};

/// Persistence capability for inventory and bookings.
#[async_trait]
pub trait TicketRepository: Send + Sync + std::fmt::Debug {
    /// Insert a ticket (seeding only; there is no other ticket CRUD).
    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket>;

    /// Find a ticket by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ticket>>;

    /// Check capacity, decrement the seat counter by one and record a
    /// booking, as one step that is serialized per ticket.
    ///
    /// Fails with `ItemNotFound` when the ticket does not exist and with
    /// `NoCapacity` when no seats remain; in both cases nothing is written.
    async fn reserve_seat(&self, ticket_id: i64, account_id: Uuid) -> AppResult<Booking>;

    /// Number of bookings recorded against a ticket.
    async fn count_bookings(&self, ticket_id: i64) -> AppResult<i64>;
}

/// PostgreSQL ticket repository.
#[derive(Debug, Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Persistence, message, e)
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets (plane_id, origin, destination, departure_date, return_date, \
             departure_hour, return_hour, available_seats, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.plane_id)
        .bind(&data.origin)
        .bind(&data.destination)
        .bind(&data.departure_date)
        .bind(&data.return_date)
        .bind(&data.departure_hour)
        .bind(&data.return_hour)
        .bind(data.available_seats)
        .bind(&data.price)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence("Failed to create ticket"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence("Failed to find ticket"))
    }

    async fn reserve_seat(&self, ticket_id: i64, account_id: Uuid) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(persistence("Failed to begin booking transaction"))?;

        // Row lock: concurrent bookers of this ticket queue here until commit.
        let seats: Option<i32> =
            sqlx::query_scalar("SELECT available_seats FROM tickets WHERE id = $1 FOR UPDATE")
                .bind(ticket_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(persistence("Failed to lock ticket"))?;

        let Some(seats) = seats else {
            return Err(AppError::item_not_found(format!(
                "Ticket {ticket_id} not found"
            )));
        };
        if seats <= 0 {
            return Err(AppError::no_capacity(format!(
                "Ticket {ticket_id} has no remaining seats"
            )));
        }

        sqlx::query(
            "UPDATE tickets SET available_seats = available_seats - 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(ticket_id)
        .execute(&mut *tx)
        .await
        .map_err(persistence("Failed to decrement seats"))?;

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, account_id, ticket_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(ticket_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(persistence("Failed to record booking"))?;

        tx.commit()
            .await
            .map_err(persistence("Failed to commit booking"))?;

        debug!(ticket_id, booking_id = %booking.id, remaining = seats - 1, "Seat reserved");
        Ok(booking)
    }

    async fn count_bookings(&self, ticket_id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE ticket_id = $1")
            .bind(ticket_id)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence("Failed to count bookings"))
    }
}
