use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use mockall::mock;
use paintbook_api::config::{ApiConfig, parse_log_level};
use paintbook_api::middleware::error_handling::AppError;
use paintbook_core::errors::{BookingError, BookingResult};
use paintbook_core::memory::InMemoryStore;
use paintbook_core::models::UserId;
use paintbook_core::models::availability::NewAvailability;
use paintbook_core::models::painter::{Painter, PainterFilter};
use paintbook_core::store::{AvailabilityStore, PainterDirectory, Stores};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tracing::Level;

use crate::test_utils::{DAY, at, server_for};

mock! {
    pub Directory {}

    #[async_trait]
    impl PainterDirectory for Directory {
        async fn find_painter_by_user_id(&self, user_id: UserId) -> BookingResult<Option<Painter>>;
        async fn list_painters(&self, filter: PainterFilter) -> BookingResult<Vec<Painter>>;
    }
}

#[rstest]
#[case(BookingError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("Slot taken".to_string()), StatusCode::CONFLICT)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_client_errors_carry_bare_message() {
    let conflict = AppError(BookingError::Conflict("Slot taken".to_string()));
    let database = AppError(BookingError::Database(eyre::eyre!("connection reset")));

    assert_eq!(conflict.message(), "Slot taken");
    assert_eq!(database.message(), "Database error: connection reset");
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let error = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(error.0, BookingError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    let store = Arc::new(InMemoryStore::new());
    let window = NewAvailability::new(1, at(DAY, "09:00"), at(DAY, "17:00")).unwrap();
    store.create_availability(window).await.unwrap();

    let mut directory = MockDirectory::new();
    directory
        .expect_find_painter_by_user_id()
        .returning(|_| Err(BookingError::Database(eyre::eyre!("connection reset"))));

    let server = server_for(Stores::new(store.clone(), store.clone(), Arc::new(directory)));
    let response = server
        .post("/api/booking-request")
        .json(&json!({
            "startTime": "2025-06-02T10:00:00Z",
            "endTime": "2025-06-02T12:00:00Z",
            "customerId": 42
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Database error: connection reset" })
    );
}

fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[("DATABASE_URL", "postgres://localhost/paintbook")]).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.database_max_connections, 5);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.recommendation_limit, 5);
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/paintbook"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("DATABASE_MAX_CONNECTIONS", "12"),
        ("LOG_LEVEL", "debug"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://paintbook.example"),
        ("API_REQUEST_TIMEOUT_SECONDS", "10"),
        ("RECOMMENDATION_LIMIT", "3"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.database_max_connections, 12);
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://paintbook.example".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 10);
    assert_eq!(config.recommendation_limit, 3);
}

#[test]
fn test_config_requires_database_url() {
    assert!(config_from(&[]).is_err());
}

#[test]
fn test_config_rejects_bad_port() {
    let result = config_from(&[("DATABASE_URL", "postgres://localhost/paintbook"), ("API_PORT", "http")]);

    assert!(result.is_err());
}

#[test]
fn test_config_rejects_bad_pool_size() {
    let result = config_from(&[
        ("DATABASE_URL", "postgres://localhost/paintbook"),
        ("DATABASE_MAX_CONNECTIONS", "lots"),
    ]);

    assert!(result.is_err());
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("WARN", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_log_level_parsing(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
