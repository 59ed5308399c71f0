//! Integration tests for ticket lookup and booking.

mod helpers;

use http::StatusCode;

use airbook_database::repositories::TicketRepository;

use helpers::TestApp;

#[tokio::test]
async fn test_booking_decrements_seats_and_records_booking() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;
    let ticket_id = app.seed_ticket(2).await;

    let response = app
        .request("POST", &format!("/tickets/{ticket_id}/book"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["booking"]["ticket_id"], ticket_id);

    let response = app
        .request("GET", &format!("/tickets/{ticket_id}"), None, Some(&token))
        .await;
    assert_eq!(response.body["ticket"]["available_seats"], 1);
    assert_eq!(
        app.repositories.tickets.count_bookings(ticket_id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;

    let response = app
        .request("POST", "/tickets/999/book", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn test_sold_out_ticket_conflicts() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;
    let ticket_id = app.seed_ticket(0).await;

    let response = app
        .request("POST", &format!("/tickets/{ticket_id}/book"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "NO_CAPACITY");
    assert_eq!(
        app.repositories.tickets.count_bookings(ticket_id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_non_numeric_ticket_id_is_rejected() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;

    let response = app
        .request("POST", "/tickets/abc/book", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_booking_requires_a_session() {
    let app = TestApp::new();
    let ticket_id = app.seed_ticket(2).await;

    let response = app
        .request("POST", &format!("/tickets/{ticket_id}/book"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.repositories.tickets.count_bookings(ticket_id).await.unwrap(),
        0
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_seat_is_sold_once_over_http() {
    let app = TestApp::new();
    let token = app.signed_in("ana", "ana@x.com").await;
    let ticket_id = app.seed_ticket(1).await;
    let path = format!("/tickets/{ticket_id}/book");

    let attempts = (0..8).map(|_| app.request("POST", &path, None, Some(&token)));
    let responses = futures::future::join_all(attempts).await;

    let booked = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    let sold_out = responses
        .iter()
        .filter(|r| r.status == StatusCode::CONFLICT)
        .count();
    assert_eq!(booked, 1);
    assert_eq!(sold_out, 7);
    assert_eq!(
        app.repositories.tickets.count_bookings(ticket_id).await.unwrap(),
        1
    );
}
