//! Error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracker_core::{ErrorResponse, TrackerError};

/// Every handler failure is reported as 400 with `{"error": message}`
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub TrackerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            tracing::error!("Request failed: {}", self.0);
            "Internal storage error".to_string()
        };

        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
