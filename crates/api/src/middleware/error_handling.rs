//! # Error Handling Middleware
//!
//! Maps `BookingError` onto HTTP status codes and a `{"error": message}` JSON
//! body, so every handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paintbook_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use paintbook_api::middleware::error_handling::AppError;
/// use paintbook_core::errors::BookingError;
///
/// async fn handler(painter_id: i64) -> Result<Json<i64>, AppError> {
///     if painter_id <= 0 {
///         return Err(AppError(BookingError::Validation("painterId must be positive".to_string())));
///     }
///     Ok(Json(painter_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors carry their bare message. Server errors keep the
    /// category prefix.
    pub fn message(&self) -> String {
        match &self.0 {
            BookingError::NotFound(message)
            | BookingError::Validation(message)
            | BookingError::Conflict(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `BookingResult` values.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
