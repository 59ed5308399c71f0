//! Account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use airbook_core::error::{AppError, ErrorKind};
use airbook_core::result::AppResult;
use airbook_entity::account::{Account, CreateAccount};

/// Persistence capability for accounts.
///
/// Username and email are unique case-insensitively; `create` reports a
/// collision as `DuplicateAccount`.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug {
    /// Insert a new account.
    async fn create(&self, data: &CreateAccount) -> AppResult<Account>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Atomically activate the pending account holding `code` and clear the
    /// code. Returns `None` when no pending account carries it.
    async fn activate_by_code(&self, code: &str) -> AppResult<Option<Account>>;

    /// Record a successful login.
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

/// PostgreSQL account repository.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, username, email, password_hash, activation_code, active, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.activation_code)
        .bind(data.active)
        .bind(&data.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_username_key") =>
            {
                AppError::duplicate_account(format!(
                    "Username '{}' is already taken",
                    data.username
                ))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_email_key") =>
            {
                AppError::duplicate_account("Email is already registered")
            }
            _ => AppError::with_source(ErrorKind::Persistence, "Failed to create account", e),
        })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to find account by email", e)
            })
    }

    async fn activate_by_code(&self, code: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET active = TRUE, activation_code = NULL, updated_at = NOW() \
             WHERE activation_code = $1 AND active = FALSE RETURNING *",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to activate account", e))
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET last_login_at = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to update last login", e)
            })?;
        Ok(())
    }
}
