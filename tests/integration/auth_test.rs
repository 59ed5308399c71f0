//! Integration tests for registration, login, logout and the session gate.

mod helpers;

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_ping_and_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/ping", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
}

#[tokio::test]
async fn test_login_returns_token_and_window() {
    let app = TestApp::new();
    app.register("ana", "ana@x.com").await;
    app.activate("ana@x.com").await;

    let response = app.login("ana@x.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(response.body["start"].is_string());
    assert!(response.body["expiry"].is_string());
}

#[tokio::test]
async fn test_login_with_identifier_field() {
    let app = TestApp::new();
    app.register("ana", "ana@x.com").await;
    app.activate("ana@x.com").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "identifier": "ana@x.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_account_and_wrong_password_look_the_same() {
    let app = TestApp::new();
    app.register("ana", "ana@x.com").await;
    app.activate("ana@x.com").await;

    let wrong_password = app.login("ana@x.com", "Wrong99").await;
    let unknown = app.login("nobody@x.com", PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body, unknown.body);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    assert_eq!(app.register("ana", "ana@x.com").await.status, StatusCode::OK);

    let same_email = app.register("ana2", "ANA@x.com").await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
    assert_eq!(same_email.error_code(), "DUPLICATE_ACCOUNT");

    let same_username = app.register("ana", "other@x.com").await;
    assert_eq!(same_username.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/register",
            Some(json!({ "username": "ana", "email": "ana@x.com", "password": "short" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new();

    let response = app
        .send_raw("POST", "/login", "{not json".to_string(), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .request("POST", "/login", Some(json!({ "email": "ana@x.com" })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_authorization_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_unknown_token_is_a_backend_error() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", None, Some("deadbeef")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "AUTH_BACKEND_ERROR");
}

#[tokio::test]
async fn test_bearer_prefix_is_optional_and_case_insensitive() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;
    let ticket_id = app.seed_ticket(5).await;
    let path = format!("/tickets/{ticket_id}");

    let lower = app
        .request_with_authorization("GET", &path, None, Some(&format!("bearer {token}")))
        .await;
    assert_eq!(lower.status, StatusCode::OK);

    let bare = app
        .request_with_authorization("GET", &path, None, Some(&token))
        .await;
    assert_eq!(bare.status, StatusCode::OK);
    assert_eq!(bare.body["ticket"]["available_seats"], 5);
}

#[tokio::test]
async fn test_token_expires_after_its_window() {
    let (app, clock) = TestApp::with_manual_clock();
    let token = app.signed_in("ana", "ana@x.com").await;
    let ticket_id = app.seed_ticket(5).await;
    let path = format!("/tickets/{ticket_id}");

    clock.advance(Duration::minutes(1440));
    let at_expiry = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(at_expiry.status, StatusCode::OK);

    clock.advance(Duration::microseconds(1));
    let after = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_logout_revokes_only_the_presented_token() {
    let app = TestApp::new();
    let first = app.signed_in("ana", "ana@x.com").await;
    let second = app.login("ana@x.com", PASSWORD).await.body["token"]
        .as_str()
        .unwrap()
        .to_string();
    let ticket_id = app.seed_ticket(5).await;
    let path = format!("/tickets/{ticket_id}");

    let response = app.request("POST", "/logout", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::OK);

    let revoked = app.request("GET", &path, None, Some(&first)).await;
    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);

    let other = app.request("GET", &path, None, Some(&second)).await;
    assert_eq!(other.status, StatusCode::OK);
}
