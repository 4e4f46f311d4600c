use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use paintbook_core::errors::BookingError;
use paintbook_core::models::UserId;
use paintbook_core::models::booking::{Booking, CreateBookingRequest, UpdateBookingStatusRequest};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn not_found(id: Uuid) -> AppError {
    AppError(BookingError::NotFound(format!("Booking with ID {} not found", id)))
}

/// Books the requested painter directly.
///
/// The slot must last at least an hour and sit inside one of the painter's
/// windows. An overlap with an active booking is a `409`.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.booking.create(&request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list_bookings(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.stores.bookings.list_bookings().await?))
}

pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .stores
        .bookings
        .get_booking(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(booking))
}

pub async fn list_painter_bookings(
    State(state): State<Arc<ApiState>>,
    Path(painter_id): Path<UserId>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.stores.bookings.list_bookings_by_painter(painter_id).await?))
}

pub async fn list_customer_bookings(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<UserId>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.stores.bookings.list_bookings_by_customer(customer_id).await?))
}

/// Moves a booking to another status.
///
/// Reactivating a cancelled booking is refused with `409` when its slot has
/// since been taken.
#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .stores
        .bookings
        .update_booking_status(id, request.status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!("Booking {} is now {}", booking.id, booking.status);
    Ok(Json(booking))
}

pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.stores.bookings.delete_booking(id).await? {
        return Err(not_found(id));
    }

    tracing::info!("Deleted booking {}", id);
    Ok(StatusCode::NO_CONTENT)
}
