//! Session token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use airbook_core::error::{AppError, ErrorKind};
use airbook_core::result::AppResult;
use airbook_entity::session::{CreateSessionToken, SessionToken};

/// Persistence capability for session tokens. Rows are keyed for lookup by
/// the digest of the bearer string, never the plaintext.
#[async_trait]
pub trait SessionTokenRepository: Send + Sync + std::fmt::Debug {
    /// Persist a newly issued token.
    async fn create(&self, data: &CreateSessionToken) -> AppResult<SessionToken>;

    /// Exact-match lookup by token digest.
    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<SessionToken>>;

    /// Move the end of a token's validity window.
    async fn set_ending_date(&self, id: Uuid, ending_date: DateTime<Utc>) -> AppResult<()>;
}

/// PostgreSQL session token repository.
#[derive(Debug, Clone)]
pub struct PgSessionTokenRepository {
    pool: PgPool,
}

impl PgSessionTokenRepository {
    /// Create a new session token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionTokenRepository for PgSessionTokenRepository {
    async fn create(&self, data: &CreateSessionToken) -> AppResult<SessionToken> {
        sqlx::query_as::<_, SessionToken>(
            "INSERT INTO session_tokens (id, account_id, token_hash, starting_date, ending_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.account_id)
        .bind(&data.token_hash)
        .bind(data.starting_date)
        .bind(data.ending_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to create session token", e)
        })
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<SessionToken>> {
        sqlx::query_as::<_, SessionToken>("SELECT * FROM session_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to look up session token", e)
            })
    }

    async fn set_ending_date(&self, id: Uuid, ending_date: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE session_tokens SET ending_date = $2 WHERE id = $1")
            .bind(id)
            .bind(ending_date)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to update session token", e)
            })?;
        Ok(())
    }
}
