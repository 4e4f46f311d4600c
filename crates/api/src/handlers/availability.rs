//! # Availability Handlers
//!
//! CRUD over painters' availability windows. Windows are stored as full UTC
//! timestamps and returned in RFC 3339.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use paintbook_core::errors::BookingError;
use paintbook_core::models::UserId;
use paintbook_core::models::availability::{
    AvailabilityResponse, CreateAvailabilityRequest, UpdateAvailabilityRequest,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

fn not_found(id: Uuid) -> AppError {
    AppError(BookingError::NotFound(format!("Availability with ID {} not found", id)))
}

/// `POST /api/availabilities`
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateAvailabilityRequest>,
) -> Result<(StatusCode, Json<AvailabilityResponse>), AppError> {
    let new = request.validate()?;
    let availability = state.stores.availability.create_availability(new).await?;

    tracing::info!(
        "Created availability {} for painter {}",
        availability.id,
        availability.painter_id
    );
    Ok((StatusCode::CREATED, Json(availability.into())))
}

/// `GET /api/availabilities`
pub async fn list_availabilities(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AvailabilityResponse>>, AppError> {
    let availabilities = state.stores.availability.list_availabilities().await?;
    Ok(Json(availabilities.into_iter().map(Into::into).collect()))
}

/// `GET /api/availabilities/:id`
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let availability = state
        .stores
        .availability
        .get_availability(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(availability.into()))
}

/// `PATCH /api/availabilities/:id`
///
/// Either bound may be omitted; the result must still start before it ends.
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let changes = request.validate()?;
    let availability = state
        .stores
        .availability
        .update_availability(id, changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!("Updated availability {}", availability.id);
    Ok(Json(availability.into()))
}

/// `DELETE /api/availabilities/:id`
pub async fn delete_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.stores.availability.delete_availability(id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/availabilities/painter/:painter_id`
pub async fn list_painter_availabilities(
    State(state): State<Arc<ApiState>>,
    Path(painter_id): Path<UserId>,
) -> Result<Json<Vec<AvailabilityResponse>>, AppError> {
    let availabilities = state
        .stores
        .availability
        .list_availabilities_by_painter(painter_id)
        .await?;
    Ok(Json(availabilities.into_iter().map(Into::into).collect()))
}

/// `DELETE /api/availabilities/painter/:painter_id`
pub async fn delete_painter_availabilities(
    State(state): State<Arc<ApiState>>,
    Path(painter_id): Path<UserId>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = state
        .stores
        .availability
        .delete_availabilities_by_painter(painter_id)
        .await?;
    Ok(Json(DeletedResponse { deleted }))
}
