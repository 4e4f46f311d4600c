use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use paintbook_core::models::recommendation::{RecommendationQuery, RecommendedSlot};
use paintbook_core::time::{self, TimeRange};

use crate::{ApiState, middleware::error_handling::AppError};

/// Suggests bookable slots close to a requested time.
///
/// # Endpoint
///
/// ```text
/// GET /api/recommendations?date=2025-06-02&startTime=10:00&endTime=12:00&painterId=3&limit=5
/// ```
///
/// `painterId` is optional and `limit` defaults to the configured
/// recommendation limit.
#[axum::debug_handler]
pub async fn get_recommendations(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<RecommendedSlot>>, AppError> {
    let date = time::parse_date(&query.date)?;
    let requested = TimeRange::parse(&query.start_time, &query.end_time)?;
    let limit = query.limit.unwrap_or(state.recommendation_limit);

    let slots = state
        .recommendations
        .find_closest_available_slots(date, requested, query.painter_id, limit)
        .await?;

    Ok(Json(slots))
}
