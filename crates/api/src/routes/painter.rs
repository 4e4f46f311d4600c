use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/painters", get(handlers::painter::list_painters))
        .route("/api/painters/:id", get(handlers::painter::get_painter))
}
