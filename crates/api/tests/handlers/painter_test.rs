use paintbook_core::models::painter::Painter;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

async fn directory() -> TestContext {
    let ctx = TestContext::new();
    ctx.painter(2, "Bob", 3.5).await;
    ctx.painter(1, "Alice", 4.5).await;
    ctx.store
        .insert_painter(Painter {
            user_id: 3,
            name: None,
            rating: 4.0,
            specialization: "Exterior Painting".to_string(),
        })
        .await;
    ctx
}

#[tokio::test]
async fn test_list_painters() {
    let ctx = directory().await;

    let response = ctx.server.get("/api/painters").await;

    response.assert_status_ok();
    let ids: Vec<Value> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|painter| painter["userId"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_list_painters_by_specialization() {
    let ctx = directory().await;

    let response = ctx
        .server
        .get("/api/painters")
        .add_query_param("specialization", "Exterior Painting")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!([{
            "userId": 3,
            "name": null,
            "rating": 4.0,
            "specialization": "Exterior Painting"
        }])
    );

    let none = ctx
        .server
        .get("/api/painters")
        .add_query_param("specialization", "Wallpaper")
        .await;
    none.assert_status_ok();
    assert_eq!(none.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_get_painter() {
    let ctx = directory().await;

    let response = ctx.server.get("/api/painters/1").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "userId": 1,
            "name": "Alice",
            "rating": 4.5,
            "specialization": "Interior Painting"
        })
    );
}

#[tokio::test]
async fn test_unknown_painter_is_not_found() {
    let ctx = directory().await;

    let response = ctx.server.get("/api/painters/99").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Painter with ID 99 not found" })
    );
}
