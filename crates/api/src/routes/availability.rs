use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availabilities",
            get(handlers::availability::list_availabilities).post(handlers::availability::create_availability),
        )
        .route(
            "/api/availabilities/:id",
            get(handlers::availability::get_availability)
                .patch(handlers::availability::update_availability)
                .delete(handlers::availability::delete_availability),
        )
        .route(
            "/api/availabilities/painter/:painter_id",
            get(handlers::availability::list_painter_availabilities)
                .delete(handlers::availability::delete_painter_availabilities),
        )
}
