//! # Booking Request Handler
//!
//! Entry point of the assignment flow. The outcome is serialized as one of
//! two shapes:
//!
//! - `201 Created` with `{bookingId, painter, startTime, endTime, status}`
//!   when a painter was booked
//! - `200 OK` with `{error, recommendations}` when nobody is free, which is
//!   an expected result rather than a failure
//!
//! Malformed requests are rejected with `400` before any matching runs.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use paintbook_core::models::assignment::{AssignmentOutcome, BookingRequest};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_booking_request(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<AssignmentOutcome>), AppError> {
    let outcome = state.assignment.create(&request).await?;

    let status = if outcome.is_assigned() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}
