//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::kernel::{AggregationFault, SourceFetchError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The one source behind a single-source endpoint failed (500)
    #[error(transparent)]
    Source(#[from] SourceFetchError),

    /// Combined fetch broke in the aggregation step itself (500)
    #[error("An unexpected error occurred during combined fetch: {0}")]
    Combined(AggregationFault),

    /// No route matched (404)
    #[error("Cannot {method} {target}")]
    NotFound { method: String, target: String },

    /// Any other unexpected fault (500)
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Source(_) | ApiError::Combined(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            ApiError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Not Found", "message": message }),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal Server Error", "message": message }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
