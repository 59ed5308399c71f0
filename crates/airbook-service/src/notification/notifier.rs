//! Notifier capability and the logging implementation.

use async_trait::async_trait;
use tracing::info;

use airbook_core::result::AppResult;
use airbook_entity::account::Account;

/// Delivers an activation code to a newly registered account.
///
/// Failures are reported to the caller, which decides whether they matter.
#[async_trait]
pub trait ActivationNotifier: Send + Sync + std::fmt::Debug {
    async fn notify(&self, account: &Account, activation_code: &str) -> AppResult<()>;
}

/// Records that an activation message would have been sent. Used when email
/// delivery is disabled. The code itself is not logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl ActivationNotifier for LogNotifier {
    async fn notify(&self, account: &Account, _activation_code: &str) -> AppResult<()> {
        info!(
            account_id = %account.id,
            "Email delivery disabled; activation message not sent"
        );
        Ok(())
    }
}
