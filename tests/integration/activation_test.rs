//! Integration tests for account activation.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_pending_account_cannot_log_in_until_activated() {
    let app = TestApp::new();

    let response = app.register("ana", "ana@x.com").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "pending");
    assert!(response.body.get("warning").is_none());

    let response = app.login("ana@x.com", PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "ACCOUNT_NOT_ACTIVATED");

    let response = app.activate("ana@x.com").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.login("ana@x.com", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
    let start = response.body["start"].as_str().unwrap();
    let expiry = response.body["expiry"].as_str().unwrap();
    let start: chrono::DateTime<chrono::Utc> = start.parse().unwrap();
    let expiry: chrono::DateTime<chrono::Utc> = expiry.parse().unwrap();
    assert!(expiry > start);
}

#[tokio::test]
async fn test_wrong_password_on_pending_account_is_invalid_credentials() {
    let app = TestApp::new();
    app.register("ana", "ana@x.com").await;

    let response = app.login("ana@x.com", "Wrong99").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_activation_code_is_single_use() {
    let app = TestApp::new();
    app.register("ana", "ana@x.com").await;

    assert_eq!(app.activate("ana@x.com").await.status, StatusCode::OK);

    let reused = app.activate("ana@x.com").await;
    assert_eq!(reused.status, StatusCode::NOT_FOUND);
    assert_eq!(reused.error_code(), "ACTIVATION_CODE_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_activation_code_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/activate", Some(json!({ "code": "c0ffee" })), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_activation_code_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/activate", Some(json!({ "code": "" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notifier_failure_is_a_warning_and_account_stays_pending() {
    let app = TestApp::new();
    app.notifier.fail_next_sends(true);

    let response = app.register("ana", "ana@x.com").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "pending");
    assert!(response.body["warning"].is_string());

    let response = app.login("ana@x.com", PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "ACCOUNT_NOT_ACTIVATED");
}
