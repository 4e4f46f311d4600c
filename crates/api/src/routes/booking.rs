use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::booking::get_booking).delete(handlers::booking::delete_booking),
        )
        .route(
            "/api/bookings/:id/status",
            patch(handlers::booking::update_booking_status),
        )
        .route(
            "/api/bookings/painter/:painter_id",
            get(handlers::booking::list_painter_bookings),
        )
        .route(
            "/api/bookings/customer/:customer_id",
            get(handlers::booking::list_customer_bookings),
        )
}
