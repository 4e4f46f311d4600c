use axum::http::StatusCode;
use paintbook_core::store::AvailabilityStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{DAY, TestContext};

#[tokio::test]
async fn test_create_availability() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availabilities")
        .json(&json!({
            "painterId": 3,
            "startTime": "2025-06-02T09:00:00Z",
            "endTime": "2025-06-02T17:00:00+00:00"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let payload: Value = response.json();
    assert_eq!(payload["painterId"], 3);
    assert_eq!(payload["startTime"], "2025-06-02T09:00:00Z");
    assert_eq!(payload["endTime"], "2025-06-02T17:00:00Z");

    let stored = ctx.store.list_availabilities().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(payload["id"], stored[0].id.to_string());
}

#[tokio::test]
async fn test_create_availability_rejects_inverted_window() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availabilities")
        .json(&json!({
            "painterId": 3,
            "startTime": "2025-06-02T17:00:00Z",
            "endTime": "2025-06-02T09:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "startTime must be before endTime" })
    );
    assert!(ctx.store.list_availabilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_availability_rejects_bad_timestamp() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availabilities")
        .json(&json!({
            "painterId": 3,
            "startTime": "tomorrow morning",
            "endTime": "2025-06-02T09:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid date format for startTime or endTime"
    );
}

#[tokio::test]
async fn test_list_availabilities_ordered_by_start() {
    let ctx = TestContext::new();
    ctx.window(2, "2025-06-03", "09:00", "12:00").await;
    ctx.window(1, DAY, "13:00", "17:00").await;
    ctx.window(1, DAY, "09:00", "12:00").await;

    let response = ctx.server.get("/api/availabilities").await;

    response.assert_status_ok();
    let starts: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|window| window["startTime"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2025-06-02T09:00:00Z",
            "2025-06-02T13:00:00Z",
            "2025-06-03T09:00:00Z"
        ]
    );
}

#[tokio::test]
async fn test_get_and_delete_availability() {
    let ctx = TestContext::new();
    let window = ctx.window(1, DAY, "09:00", "17:00").await;
    let path = format!("/api/availabilities/{}", window.id);

    let found = ctx.server.get(&path).await;
    found.assert_status_ok();
    assert_eq!(found.json::<Value>()["id"], window.id.to_string());

    ctx.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    ctx.server.get(&path).await.assert_status_not_found();
    ctx.server.delete(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_unknown_availability_is_not_found() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    let response = ctx.server.get(&format!("/api/availabilities/{}", id)).await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": format!("Availability with ID {} not found", id) })
    );
}

#[tokio::test]
async fn test_painter_availabilities() {
    let ctx = TestContext::new();
    ctx.window(1, DAY, "09:00", "12:00").await;
    ctx.window(1, DAY, "13:00", "17:00").await;
    ctx.window(2, DAY, "09:00", "17:00").await;

    let listed = ctx.server.get("/api/availabilities/painter/1").await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Vec<Value>>().len(), 2);

    let deleted = ctx.server.delete("/api/availabilities/painter/1").await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>(), json!({ "deleted": 2 }));

    let remaining = ctx.store.list_availabilities().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].painter_id, 2);
}

#[tokio::test]
async fn test_update_availability() {
    let ctx = TestContext::new();
    let window = ctx.window(3, DAY, "09:00", "17:00").await;

    let response = ctx
        .server
        .patch(&format!("/api/availabilities/{}", window.id))
        .json(&json!({ "endTime": "2025-06-02T12:00:00Z" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "id": window.id.to_string(),
            "painterId": 3,
            "startTime": "2025-06-02T09:00:00Z",
            "endTime": "2025-06-02T12:00:00Z"
        })
    );
    let stored = ctx.store.get_availability(window.id).await.unwrap().unwrap();
    assert_eq!(stored.end_time.to_rfc3339(), "2025-06-02T12:00:00+00:00");
}

#[tokio::test]
async fn test_update_availability_validation() {
    let ctx = TestContext::new();
    let window = ctx.window(3, DAY, "09:00", "17:00").await;
    let path = format!("/api/availabilities/{}", window.id);

    let inverted = ctx
        .server
        .patch(&path)
        .json(&json!({ "startTime": "2025-06-02T18:00:00Z" }))
        .await;
    inverted.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        inverted.json::<Value>(),
        json!({ "error": "startTime must be before endTime" })
    );

    let empty = ctx.server.patch(&path).json(&json!({})).await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        empty.json::<Value>(),
        json!({ "error": "Nothing to update: provide startTime or endTime" })
    );

    let garbled = ctx
        .server
        .patch(&path)
        .json(&json!({ "startTime": "soon" }))
        .await;
    garbled.assert_status(StatusCode::BAD_REQUEST);

    let stored = ctx.store.get_availability(window.id).await.unwrap().unwrap();
    assert_eq!(stored, window);
}

#[tokio::test]
async fn test_update_unknown_availability() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    let response = ctx
        .server
        .patch(&format!("/api/availabilities/{}", id))
        .json(&json!({ "endTime": "2025-06-02T12:00:00Z" }))
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": format!("Availability with ID {} not found", id) })
    );
}
