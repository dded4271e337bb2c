use axum::{
    extract::Extension,
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::Serialize;

use crate::common::JobSource;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    sources: Vec<JobSource>,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    message: &'static str,
    endpoints: [&'static str; 3],
}

/// Health check endpoint
///
/// Sources are not probed: upstream availability is reported per request
/// by the job endpoints.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            sources: state.aggregator.sources(),
        }),
    )
}

pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Tech Job Listing API. Use /api/jobs/all to fetch listings.",
        endpoints: ["/api/jobs/linkedin", "/api/jobs/naukri", "/api/jobs/all"],
    })
}

pub async fn not_found_handler(method: Method, uri: Uri) -> ApiError {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    ApiError::NotFound {
        method: method.to_string(),
        target: target.to_string(),
    }
}
