//! Account lifecycle: register, activate, login, logout.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};
use validator::ValidateEmail;

use airbook_auth::password::{PasswordHasher, PasswordPolicy};
use airbook_auth::random::generate_hex_code;
use airbook_auth::token::{IssuedToken, TokenStore};
use airbook_core::config::AuthConfig;
use airbook_core::error::AppError;
use airbook_database::repositories::AccountRepository;
use airbook_entity::account::{Account, CreateAccount};

use crate::notification::ActivationNotifier;

const MAX_USERNAME_CHARS: usize = 64;

/// Warning returned when the account was created but the activation
/// message could not be delivered.
pub const NOTIFICATION_WARNING: &str =
    "Account created, but the activation email could not be sent";

/// Registration request data.
#[derive(Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub ip_address: Option<String>,
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"****")
            .field("ip_address", &self.ip_address)
            .finish()
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: Account,
    /// Set when the activation message failed; registration still succeeded.
    pub notification_warning: Option<String>,
}

/// Handles the `Pending -> Active` account lifecycle and session tokens.
#[derive(Debug)]
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<TokenStore>,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    notifier: Arc<dyn ActivationNotifier>,
    config: AuthConfig,
    /// Verified against when the account is unknown, so both failure paths
    /// pay for one Argon2 verification.
    dummy_hash: OnceCell<String>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<TokenStore>,
        hasher: PasswordHasher,
        notifier: Arc<dyn ActivationNotifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            accounts,
            tokens,
            hasher,
            policy: PasswordPolicy::new(&config),
            notifier,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Registers a new account.
    ///
    /// With activation required the account starts pending and an activation
    /// code is sent through the notifier. A notifier failure is returned as
    /// a warning and never activates the account.
    pub async fn register(&self, input: RegisterInput) -> Result<Registration, AppError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(AppError::validation(format!(
                "Username must be at most {MAX_USERNAME_CHARS} characters"
            )));
        }
        if !email.validate_email() {
            return Err(AppError::validation("Email address is not valid"));
        }
        self.policy.validate(&input.password)?;

        let password_hash = self.hasher.hash_password_async(input.password).await?;
        let activation_code = if self.config.require_activation {
            Some(generate_hex_code(self.config.activation_code_bytes)?)
        } else {
            None
        };

        let account = self
            .accounts
            .create(&CreateAccount {
                username,
                email,
                password_hash,
                activation_code: activation_code.clone(),
                active: !self.config.require_activation,
                ip_address: input.ip_address,
            })
            .await?;

        info!(
            account_id = %account.id,
            username = %account.username,
            status = %account.status(),
            "Account registered"
        );

        let mut notification_warning = None;
        if let Some(code) = activation_code {
            if let Err(e) = self.notifier.notify(&account, &code).await {
                warn!(
                    account_id = %account.id,
                    error = %e,
                    "Activation notification failed; account stays pending"
                );
                notification_warning = Some(NOTIFICATION_WARNING.to_string());
            }
        }

        Ok(Registration {
            account,
            notification_warning,
        })
    }

    /// Redeems an activation code. This is the only way a pending account
    /// becomes active; the code cannot be used twice.
    pub async fn activate(&self, code: &str) -> Result<Account, AppError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("Activation code is required"));
        }

        let account = self
            .accounts
            .activate_by_code(code)
            .await?
            .ok_or_else(AppError::activation_code_not_found)?;

        info!(account_id = %account.id, "Account activated");
        Ok(account)
    }

    /// Authenticates by email and password and issues a session token.
    ///
    /// Unknown email and wrong password produce the same error. The password
    /// is checked before the activation state.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let Some(account) = self.accounts.find_by_email(email.trim()).await? else {
            let dummy = self.dummy_hash().await?;
            let _ = self
                .hasher
                .verify_password_async(password.to_string(), dummy)
                .await;
            warn!("Login failed: unknown account");
            return Err(AppError::invalid_credentials());
        };

        let verified = self
            .hasher
            .verify_password_async(password.to_string(), account.password_hash.clone())
            .await?;
        if !verified {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        if !account.active {
            warn!(account_id = %account.id, "Login refused: account not activated");
            return Err(AppError::account_not_activated());
        }

        let issued = self.tokens.issue(account.id).await?;

        if let Err(e) = self
            .accounts
            .update_last_login(account.id, issued.record.starting_date)
            .await
        {
            warn!(account_id = %account.id, error = %e, "Failed to record last login");
        }

        info!(
            account_id = %account.id,
            token_id = %issued.record.id,
            "Login successful"
        );
        Ok(issued)
    }

    /// Revokes the presented token only. Other tokens of the account stay valid.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let record = self.tokens.revoke(token).await?;
        info!(
            account_id = %record.account_id,
            token_id = %record.id,
            "Logged out"
        );
        Ok(())
    }

    async fn dummy_hash(&self) -> Result<String, AppError> {
        self.dummy_hash
            .get_or_try_init(|| async {
                let filler = generate_hex_code(16)?;
                self.hasher.hash_password_async(filler).await
            })
            .await
            .cloned()
    }
}
