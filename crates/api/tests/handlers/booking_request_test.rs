use axum::http::StatusCode;
use paintbook_core::models::assignment::NO_PAINTERS_AVAILABLE;
use paintbook_core::models::booking::BookingStatus;
use paintbook_core::store::BookingStore;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{DAY, TestContext};

fn body(start: &str, end: &str) -> Value {
    json!({
        "startTime": start,
        "endTime": end,
        "customerId": 42
    })
}

#[tokio::test]
async fn test_booking_request_assigns_painter() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice Painter", 4.5).await;
    ctx.window(1, DAY, "09:00", "17:00").await;

    let response = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T10:00:00Z", "2025-06-02T12:00:00Z"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let payload: Value = response.json();
    assert_eq!(payload["painter"], json!({ "id": 1, "name": "Alice Painter" }));
    assert_eq!(payload["startTime"], "2025-06-02T10:00:00Z");
    assert_eq!(payload["endTime"], "2025-06-02T12:00:00Z");
    assert_eq!(payload["status"], "confirmed");

    let bookings = ctx.store.list_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(payload["bookingId"], bookings[0].id.to_string());
    assert_eq!(bookings[0].customer_id, 42);
}

#[tokio::test]
async fn test_booking_request_prefers_higher_rating() {
    let ctx = TestContext::new();
    ctx.painter(1, "Modest", 3.0).await;
    ctx.painter(2, "Star", 4.5).await;
    ctx.window(1, DAY, "09:00", "17:00").await;
    ctx.window(2, DAY, "09:00", "17:00").await;

    let response = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T10:00:00Z", "2025-06-02T12:00:00Z"))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["painter"]["id"], 2);
}

#[test_log::test(tokio::test)]
async fn test_booking_request_conflict_returns_recommendations() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 4.0).await;
    ctx.window(1, DAY, "09:00", "17:00").await;
    ctx.booking(1, 100, DAY, "10:00", "11:00", BookingStatus::Confirmed)
        .await;

    let response = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T10:30:00Z", "2025-06-02T11:30:00Z"))
        .await;

    response.assert_status(StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(payload["error"], NO_PAINTERS_AVAILABLE);
    assert_eq!(payload["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(
        payload["recommendations"][0],
        json!({
            "painterId": 1,
            "painterName": "Alice",
            "date": "2025-06-02",
            "startTime": "11:30",
            "endTime": "12:30",
            "dayOfWeek": "monday",
            "reason": "Within 1 hour of requested time",
            "timeDifference": 60,
            "painterRating": 4.0
        })
    );
    assert_eq!(ctx.store.list_bookings().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_request_without_availability() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 4.0).await;

    let response = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T10:00:00Z", "2025-06-02T12:00:00Z"))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "No painters are available for the requested time slot.",
            "recommendations": []
        })
    );
}

#[rstest]
#[case("yesterday", "2025-06-02T12:00:00Z", "Invalid date format for startTime or endTime")]
#[case("2025-06-02T12:00:00Z", "2025-06-02T10:00:00Z", "startTime must be before endTime")]
#[tokio::test]
async fn test_booking_request_validation(#[case] start: &str, #[case] end: &str, #[case] expected: &str) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/booking-request")
        .json(&body(start, end))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": expected }));
    assert!(ctx.store.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_request_for_same_slot_gets_recommendations() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 4.0).await;
    ctx.window(1, DAY, "09:00", "17:00").await;

    let first = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T10:00:00Z", "2025-06-02T12:00:00Z"))
        .await;
    let second = ctx
        .server
        .post("/api/booking-request")
        .json(&body("2025-06-02T11:00:00Z", "2025-06-02T13:00:00Z"))
        .await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::OK);
    assert_eq!(second.json::<Value>()["error"], NO_PAINTERS_AVAILABLE);
    assert_eq!(ctx.store.list_bookings().await.unwrap().len(), 1);
}
