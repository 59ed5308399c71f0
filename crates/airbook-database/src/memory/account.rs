//! In-memory account repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use airbook_core::error::AppError;
use airbook_core::result::AppResult;
use airbook_entity::account::{Account, CreateAccount};

use crate::repositories::AccountRepository;

/// Accounts held in a map guarded by a Tokio `RwLock`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryAccountRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        // Uniqueness is checked under the write lock, matching the unique
        // indexes of the PostgreSQL schema.
        let username = data.username.to_lowercase();
        let email = data.email.to_lowercase();
        for existing in accounts.values() {
            if existing.username.to_lowercase() == username {
                return Err(AppError::duplicate_account(format!(
                    "Username '{}' is already taken",
                    data.username
                )));
            }
            if existing.email.to_lowercase() == email {
                return Err(AppError::duplicate_account("Email is already registered"));
            }
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            activation_code: data.activation_code.clone(),
            active: data.active,
            last_login_at: None,
            ip_address: data.ip_address.clone(),
            created_at: now,
            updated_at: now,
        };
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let email = email.to_lowercase();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.to_lowercase() == email)
            .cloned())
    }

    async fn activate_by_code(&self, code: &str) -> AppResult<Option<Account>> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts
            .values_mut()
            .find(|a| !a.active && a.activation_code.as_deref() == Some(code))
        else {
            return Ok(None);
        };

        account.active = true;
        account.activation_code = None;
        account.updated_at = Utc::now();
        Ok(Some(account.clone()))
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.last_login_at = Some(at);
            account.updated_at = Utc::now();
        }
        Ok(())
    }
}
