//! Application setup and server configuration.

use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::RateLimitConfig;
use crate::kernel::Aggregator;
use crate::server::error::ApiError;
use crate::server::routes::{
    all_jobs_handler, health_handler, linkedin_jobs_handler, naukri_jobs_handler,
    not_found_handler, root_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

/// Turn a handler panic into the generic 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(panic = %message, "Request handler panicked");
    ApiError::Internal(message).into_response()
}

/// Build the router without rate limiting
///
/// The governor layer needs the peer address, which in-process test
/// requests do not carry, so tests drive this router directly.
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - read-only API, any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    // Non-GET methods on known paths get the same 404 body as unknown paths
    Router::new()
        .route("/", get(root_handler).fallback(not_found_handler))
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route(
            "/api/jobs/linkedin",
            get(linkedin_jobs_handler).fallback(not_found_handler),
        )
        .route(
            "/api/jobs/naukri",
            get(naukri_jobs_handler).fallback(not_found_handler),
        )
        .route(
            "/api/jobs/all",
            get(all_jobs_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the full application: router plus per-IP rate limiting
pub fn build_app(state: AppState, rate_limit: &RateLimitConfig) -> Result<Router> {
    let router = build_router(state);

    if !rate_limit.enabled {
        tracing::warn!("Rate limiting disabled");
        return Ok(router);
    }

    // One request replenishes every window/max_requests; bursts up to max_requests
    let max_requests = rate_limit.max_requests.max(1);
    let period_ms = (rate_limit.window.as_millis() / u128::from(max_requests)).max(1);
    let period_ms = u64::try_from(period_ms).unwrap_or(u64::MAX);

    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(period_ms)
            .burst_size(max_requests)
            .use_headers() // Extract IP from X-Forwarded-For / X-Real-IP, else peer address
            .finish()
            .context("Invalid rate limiter configuration")?,
    );

    tracing::info!(
        max_requests,
        window_secs = rate_limit.window.as_secs(),
        "Rate limiting enabled"
    );

    Ok(router.layer(GovernorLayer {
        config: rate_limit_config,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_build_app_with_rate_limit() {
        let state = AppState::new(Aggregator::new());
        let limits = RateLimitConfig::default();
        assert!(build_app(state, &limits).is_ok());
    }
}
