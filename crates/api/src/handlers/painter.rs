use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use paintbook_core::errors::BookingError;
use paintbook_core::models::UserId;
use paintbook_core::models::painter::{Painter, PainterFilter};

use crate::{ApiState, middleware::error_handling::AppError};

/// `GET /api/painters?specialization=`
pub async fn list_painters(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<PainterFilter>,
) -> Result<Json<Vec<Painter>>, AppError> {
    Ok(Json(state.stores.painters.list_painters(filter).await?))
}

pub async fn get_painter(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<UserId>,
) -> Result<Json<Painter>, AppError> {
    let painter = state
        .stores
        .painters
        .find_painter_by_user_id(id)
        .await?
        .ok_or_else(|| AppError(BookingError::NotFound(format!("Painter with ID {} not found", id))))?;
    Ok(Json(painter))
}
