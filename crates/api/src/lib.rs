//! # Paintbook API
//!
//! HTTP server for the painter booking service: booking requests,
//! recommendations, availability windows, booking records and the painter
//! directory.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into engine and store calls
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The server is written against the store traits of `paintbook-core`, so the
//! same router runs on PostgreSQL in production and on the in-memory store in
//! tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::{BoxError, Json, Router};
use eyre::{Result, WrapErr};
use paintbook_core::services::{BookingAssignmentService, BookingService, RecommendationEngine};
use paintbook_core::store::Stores;
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub stores: Stores,
    pub assignment: BookingAssignmentService,
    /// Direct bookings of a chosen painter
    pub booking: BookingService,
    pub recommendations: RecommendationEngine,
    /// Default `limit` for recommendation queries
    pub recommendation_limit: usize,
}

impl ApiState {
    pub fn new(stores: Stores, recommendation_limit: usize) -> Self {
        Self {
            assignment: BookingAssignmentService::new(stores.clone())
                .with_recommendation_limit(recommendation_limit),
            booking: BookingService::new(stores.clone()),
            recommendations: RecommendationEngine::new(stores.clone()),
            stores,
            recommendation_limit,
        }
    }
}

/// Installs the global `tracing` subscriber at `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// All routes with state attached, without transport layers.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking assignment
        .merge(routes::booking_request::routes())
        // Slot recommendations
        .merge(routes::recommendation::routes())
        // Availability management endpoints
        .merge(routes::availability::routes())
        // Booking records
        .merge(routes::booking::routes())
        // Painter directory
        .merge(routes::painter::routes())
        .with_state(state)
}

/// Starts the API server on top of the given stores
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use paintbook_core::{memory::InMemoryStore, store::Stores};
/// # async fn run() -> eyre::Result<()> {
/// let config = paintbook_api::config::ApiConfig::from_env()?;
/// let stores = Stores::from_backend(Arc::new(InMemoryStore::new()));
/// paintbook_api::start_server(config, stores).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, stores: Stores) -> Result<()> {
    let state = Arc::new(ApiState::new(stores, config.recommendation_limit));
    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

async fn handle_timeout(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }
}
