//! Session token issue, lookup, validity and revocation.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use airbook_core::config::AuthConfig;
use airbook_core::error::AppError;
use airbook_core::traits::Clock;
use airbook_database::repositories::SessionTokenRepository;
use airbook_entity::session::{CreateSessionToken, SessionToken};

use super::digest::token_digest;
use crate::random::generate_hex_code;

/// A freshly issued token. `token` is the bearer string handed to the client
/// and is never stored.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub record: SessionToken,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[redacted]")
            .field("record", &self.record)
            .finish()
    }
}

/// Issues and validates opaque bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenStore {
    repo: Arc<dyn SessionTokenRepository>,
    clock: Arc<dyn Clock>,
    ttl_minutes: i64,
    token_bytes: usize,
}

impl TokenStore {
    /// Creates a token store from auth configuration.
    pub fn new(
        repo: Arc<dyn SessionTokenRepository>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            repo,
            clock,
            ttl_minutes: config.token_ttl_minutes,
            token_bytes: config.token_bytes,
        }
    }

    /// Issues a new token for `account_id`, valid from now for the configured TTL.
    pub async fn issue(&self, account_id: Uuid) -> Result<IssuedToken, AppError> {
        let token = generate_hex_code(self.token_bytes)?;
        // PostgreSQL keeps microseconds; truncate so the stored start never
        // rounds past the instant it was issued at.
        let starting_date = self.clock.now().trunc_subsecs(6);
        let ending_date = Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| starting_date.checked_add_signed(ttl))
            .ok_or_else(|| AppError::internal("Session token lifetime is out of range"))?;

        let record = self
            .repo
            .create(&CreateSessionToken {
                account_id,
                token_hash: token_digest(&token),
                starting_date,
                ending_date,
            })
            .await?;

        info!(
            account_id = %account_id,
            token_id = %record.id,
            expires_at = %record.ending_date,
            "Session token issued"
        );

        Ok(IssuedToken { token, record })
    }

    /// Exact-match lookup of a bearer string.
    ///
    /// Fails with `TokenNotFound` when no row matches, and propagates
    /// persistence failures unchanged.
    pub async fn resolve(&self, token: &str) -> Result<SessionToken, AppError> {
        self.repo
            .find_by_hash(&token_digest(token))
            .await?
            .ok_or_else(AppError::token_not_found)
    }

    /// Whether the token's window contains the current instant.
    pub fn is_valid(&self, token: &SessionToken) -> bool {
        token.is_valid_at(self.clock.now())
    }

    /// Ends the token's window immediately. The row is kept.
    pub async fn revoke(&self, token: &str) -> Result<SessionToken, AppError> {
        let mut record = self.resolve(token).await?;
        let cutoff = self.clock.now() - Duration::microseconds(1);

        if record.ending_date > cutoff {
            self.repo.set_ending_date(record.id, cutoff).await?;
            record.ending_date = cutoff;
            info!(
                account_id = %record.account_id,
                token_id = %record.id,
                "Session token revoked"
            );
        } else {
            debug!(token_id = %record.id, "Session token already out of window");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use airbook_core::error::ErrorKind;
    use airbook_core::traits::ManualClock;
    use airbook_database::memory::MemorySessionTokenRepository;

    use super::*;

    fn store_at(start: DateTime<Utc>) -> (TokenStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let store = TokenStore::new(
            Arc::new(MemorySessionTokenRepository::new()),
            clock.clone(),
            &AuthConfig::default(),
        );
        (store, clock)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn issued_token_resolves_and_has_configured_window() {
        let (store, _) = store_at(t0());
        let account_id = Uuid::new_v4();

        let issued = store.issue(account_id).await.unwrap();
        assert_eq!(issued.token.len(), 64);
        assert_ne!(issued.record.token_hash, issued.token);
        assert_eq!(issued.record.starting_date, t0());
        assert_eq!(issued.record.ending_date, t0() + Duration::minutes(1440));

        let resolved = store.resolve(&issued.token).await.unwrap();
        assert_eq!(resolved.id, issued.record.id);
        assert_eq!(resolved.account_id, account_id);
    }

    #[tokio::test]
    async fn out_of_range_ttl_fails_instead_of_panicking() {
        let config = AuthConfig {
            token_ttl_minutes: 1_000_000_000_000,
            ..AuthConfig::default()
        };
        let store = TokenStore::new(
            Arc::new(MemorySessionTokenRepository::new()),
            Arc::new(ManualClock::new(t0())),
            &config,
        );

        let err = store.issue(Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err.kind, ErrorKind::Internal);
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let (store, _) = store_at(t0());
        let err = store.resolve("deadbeef").await.unwrap_err();
        assert_matches!(err.kind, ErrorKind::TokenNotFound);
    }

    #[tokio::test]
    async fn validity_follows_the_clock() {
        let (store, clock) = store_at(t0());
        let issued = store.issue(Uuid::new_v4()).await.unwrap();
        let t1 = issued.record.ending_date;

        assert!(store.is_valid(&issued.record));

        clock.set(t1);
        assert!(store.is_valid(&issued.record));

        clock.set(t1 + Duration::nanoseconds(1));
        assert!(!store.is_valid(&issued.record));

        clock.set(t0() - Duration::nanoseconds(1));
        assert!(!store.is_valid(&issued.record));
    }

    #[tokio::test]
    async fn revoke_ends_window_and_keeps_row() {
        let (store, _) = store_at(t0());
        let issued = store.issue(Uuid::new_v4()).await.unwrap();

        store.revoke(&issued.token).await.unwrap();

        let resolved = store.resolve(&issued.token).await.unwrap();
        assert!(resolved.ending_date < t0());
        assert!(!store.is_valid(&resolved));
    }

    #[tokio::test]
    async fn revoke_only_touches_the_presented_token() {
        let (store, _) = store_at(t0());
        let account_id = Uuid::new_v4();
        let first = store.issue(account_id).await.unwrap();
        let second = store.issue(account_id).await.unwrap();

        store.revoke(&first.token).await.unwrap();

        let second = store.resolve(&second.token).await.unwrap();
        assert!(store.is_valid(&second));
    }

    #[tokio::test]
    async fn revoking_unknown_token_fails() {
        let (store, _) = store_at(t0());
        let err = store.revoke("feedface").await.unwrap_err();
        assert_matches!(err.kind, ErrorKind::TokenNotFound);
    }
}
