//! In-memory session token repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use airbook_core::error::AppError;
use airbook_core::result::AppResult;
use airbook_entity::session::{CreateSessionToken, SessionToken};

use crate::repositories::SessionTokenRepository;

/// Tokens indexed by digest.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionTokenRepository {
    tokens: Arc<RwLock<HashMap<String, SessionToken>>>,
}

impl MemorySessionTokenRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionTokenRepository for MemorySessionTokenRepository {
    async fn create(&self, data: &CreateSessionToken) -> AppResult<SessionToken> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&data.token_hash) {
            return Err(AppError::persistence("Session token digest already exists"));
        }

        let token = SessionToken {
            id: Uuid::new_v4(),
            account_id: data.account_id,
            token_hash: data.token_hash.clone(),
            starting_date: data.starting_date,
            ending_date: data.ending_date,
            created_at: Utc::now(),
        };
        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<SessionToken>> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn set_ending_date(&self, id: Uuid, ending_date: DateTime<Utc>) -> AppResult<()> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.values_mut().find(|t| t.id == id) {
            token.ending_date = ending_date;
        }
        Ok(())
    }
}
