//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, TimeZone, Utc};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use airbook_api::{AppState, build_app};
use airbook_core::config::AppConfig;
use airbook_core::error::AppError;
use airbook_core::result::AppResult;
use airbook_core::traits::{Clock, ManualClock, SystemClock};
use airbook_database::Repositories;
use airbook_database::repositories::TicketRepository;
use airbook_entity::account::Account;
use airbook_entity::ticket::CreateTicket;
use airbook_service::ActivationNotifier;

pub const PASSWORD: &str = "Secret1";

/// Captures activation codes instead of sending them. Can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn fail_next_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Last code sent to `email`.
    pub fn code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl ActivationNotifier for RecordingNotifier {
    async fn notify(&self, account: &Account, activation_code: &str) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::notification("SMTP relay unreachable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((account.email.clone(), activation_code.to_string()));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub repositories: Repositories,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// In-memory application on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// In-memory application on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let repositories = Repositories::in_memory();
        let notifier = Arc::new(RecordingNotifier::default());
        let mut config = AppConfig::default();
        config.auth.require_activation = true;
        config.email.enabled = true;

        let state = AppState::new(
            config,
            repositories.clone(),
            clock,
            notifier.clone(),
        );

        Self {
            router: build_app(state),
            repositories,
            notifier,
        }
    }

    /// In-memory application on a manual clock starting at a fixed instant.
    pub fn with_manual_clock() -> (Self, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(t0()));
        (Self::with_clock(clock.clone()), clock)
    }

    /// Adds a ticket with `seats` seats and returns its id.
    pub async fn seed_ticket(&self, seats: i32) -> i64 {
        self.repositories
            .tickets
            .create(&CreateTicket::one_way(
                "LIS",
                "OPO",
                "2026-11-02",
                seats,
                "49.90",
            ))
            .await
            .expect("Failed to seed ticket")
            .id
    }

    pub async fn register(&self, username: &str, email: &str) -> TestResponse {
        self.request(
            "POST",
            "/register",
            Some(json!({ "username": username, "email": email, "password": PASSWORD })),
            None,
        )
        .await
    }

    pub async fn activate(&self, email: &str) -> TestResponse {
        let code = self
            .notifier
            .code_for(email)
            .expect("No activation code recorded");
        self.request("POST", "/activate", Some(json!({ "code": code })), None)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Registers, activates and logs in; returns the bearer token.
    pub async fn signed_in(&self, username: &str, email: &str) -> String {
        assert_eq!(self.register(username, email).await.status, StatusCode::OK);
        assert_eq!(self.activate(email).await.status, StatusCode::OK);
        let response = self.login(email, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Sends a request with `Authorization: Bearer <token>` when a token is given.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Sends a request with a verbatim `Authorization` header value.
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send_raw(method, path, body_str, authorization).await
    }

    /// Sends an arbitrary body string as JSON.
    pub async fn send_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
