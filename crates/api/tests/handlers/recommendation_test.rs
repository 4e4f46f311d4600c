use axum::http::StatusCode;
use paintbook_core::models::booking::BookingStatus;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{DAY, TestContext};

fn starts(payload: &Value) -> Vec<String> {
    payload
        .as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|slot| slot["startTime"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_recommendations_for_free_slot() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 4.0).await;
    ctx.window(1, DAY, "09:00", "17:00").await;

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("date", DAY)
        .add_query_param("startTime", "10:00")
        .add_query_param("endTime", "12:00")
        .await;

    response.assert_status_ok();
    let payload: Value = response.json();
    assert_eq!(payload.as_array().unwrap().len(), 1);
    assert_eq!(payload[0]["reason"], "Exact time slot available");
    assert_eq!(payload[0]["timeDifference"], 0);
}

#[tokio::test]
async fn test_recommendations_around_conflict() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 4.0).await;
    ctx.window(1, DAY, "09:00", "17:00").await;
    ctx.booking(1, 100, DAY, "10:00", "11:00", BookingStatus::Confirmed)
        .await;

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("date", DAY)
        .add_query_param("startTime", "10:30")
        .add_query_param("endTime", "11:30")
        .await;

    response.assert_status_ok();
    assert_eq!(starts(&response.json()), vec!["11:30", "09:00", "12:00"]);
}

#[tokio::test]
async fn test_recommendations_honour_limit_and_painter() {
    let ctx = TestContext::new();
    ctx.painter(1, "Alice", 5.0).await;
    ctx.painter(2, "Bob", 3.0).await;
    ctx.window(1, DAY, "09:00", "17:00").await;
    ctx.window(2, DAY, "09:00", "17:00").await;
    ctx.booking(2, 100, DAY, "10:00", "11:00", BookingStatus::Confirmed)
        .await;

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("date", DAY)
        .add_query_param("startTime", "10:30")
        .add_query_param("endTime", "11:30")
        .add_query_param("painterId", 2)
        .add_query_param("limit", 1)
        .await;

    response.assert_status_ok();
    let payload: Value = response.json();
    assert_eq!(payload.as_array().unwrap().len(), 1);
    assert_eq!(payload[0]["painterId"], 2);
    assert_eq!(payload[0]["startTime"], "11:30");
}

#[rstest]
#[case("2025-13-01", "10:00", "11:00", "Invalid date '2025-13-01': expected YYYY-MM-DD")]
#[case(DAY, "25:00", "26:00", "Invalid time '25:00': expected HH:MM")]
#[tokio::test]
async fn test_recommendations_reject_bad_input(
    #[case] date: &str,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: &str,
) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("date", date)
        .add_query_param("startTime", start)
        .add_query_param("endTime", end)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": expected }));
}

#[tokio::test]
async fn test_recommendations_reject_inverted_range() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("date", DAY)
        .add_query_param("startTime", "12:00")
        .add_query_param("endTime", "10:00")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_require_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/recommendations")
        .add_query_param("startTime", "10:00")
        .add_query_param("endTime", "11:00")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
