//! Unified application error types for Airbook.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed or rejected input.
    Validation,
    /// Username or email already taken.
    DuplicateAccount,
    /// Unknown identifier or wrong password. Both produce the same message.
    InvalidCredentials,
    /// Correct credentials, but the account has not redeemed its activation code.
    AccountNotActivated,
    /// Missing, expired, or revoked bearer token.
    Unauthenticated,
    /// The presented token does not exist in the token store.
    TokenNotFound,
    /// Token resolution failed for infrastructural reasons.
    AuthBackend,
    /// The requested inventory item does not exist.
    ItemNotFound,
    /// No pending account carries the given activation code.
    ActivationCodeNotFound,
    /// The inventory item has no remaining seats.
    NoCapacity,
    /// Password hashing or verification failed internally.
    Hashing,
    /// A data-access operation failed.
    Persistence,
    /// Outbound activation notification failed.
    Notification,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code rendered in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::DuplicateAccount => "DUPLICATE_ACCOUNT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountNotActivated => "ACCOUNT_NOT_ACTIVATED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::AuthBackend => "AUTH_BACKEND_ERROR",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::ActivationCodeNotFound => "ACTIVATION_CODE_NOT_FOUND",
            Self::NoCapacity => "NO_CAPACITY",
            Self::Hashing => "HASHING_ERROR",
            Self::Persistence => "PERSISTENCE_ERROR",
            Self::Notification => "NOTIFICATION_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Whether this kind describes a server-side failure whose details must
    /// stay out of response bodies.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::TokenNotFound
                | Self::AuthBackend
                | Self::Hashing
                | Self::Persistence
                | Self::Notification
                | Self::Configuration
                | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout Airbook.
///
/// Crate-specific errors are mapped into `AppError` with explicit
/// `.map_err()` calls or the `From` impls below.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a duplicate-account error.
    pub fn duplicate_account(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateAccount, message)
    }

    /// Create the invalid-credentials error. The message is fixed so that
    /// unknown accounts and wrong passwords are indistinguishable.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    /// Create an account-not-activated error.
    pub fn account_not_activated() -> Self {
        Self::new(
            ErrorKind::AccountNotActivated,
            "Account has not been activated",
        )
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a token-not-found error.
    pub fn token_not_found() -> Self {
        Self::new(ErrorKind::TokenNotFound, "Session token not found")
    }

    /// Create an auth-backend error.
    pub fn auth_backend(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthBackend, message)
    }

    /// Create an item-not-found error.
    pub fn item_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ItemNotFound, message)
    }

    /// Create an activation-code-not-found error.
    pub fn activation_code_not_found() -> Self {
        Self::new(
            ErrorKind::ActivationCodeNotFound,
            "Activation code is unknown or already used",
        )
    }

    /// Create a no-capacity error.
    pub fn no_capacity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoCapacity, message)
    }

    /// Create a hashing error.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Hashing, message)
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence, message)
    }

    /// Create a notification error.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Notification, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
