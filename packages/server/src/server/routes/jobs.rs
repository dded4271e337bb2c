//! Job listing endpoints.
//!
//! GET /api/jobs/linkedin, /api/jobs/naukri and /api/jobs/all.
//! Single-source endpoints answer 500 when their source fails; the combined
//! endpoint always answers 200 with whatever succeeded plus itemized errors.
//! Query strings are read as raw pairs so malformed or repeated parameters
//! fall through to the usual coercion instead of a rejection.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Serialize;

use crate::common::{Job, JobQuery, JobSource, QueryParameters};
use crate::kernel::SourceError;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

const COMBINED: &str = "Combined";

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub source: &'static str,
    pub count: usize,
    pub jobs: Vec<Job>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SourceError>,
}

impl JobsResponse {
    fn new(source: &'static str, jobs: Vec<Job>, errors: Vec<SourceError>) -> Self {
        Self {
            source,
            count: jobs.len(),
            jobs,
            errors,
        }
    }
}

async fn single_source(
    state: &AppState,
    source: JobSource,
    params: QueryParameters,
) -> ApiResult<Json<JobsResponse>> {
    let jobs = state
        .aggregator
        .fetch_one(source, &params)
        .await
        .map_err(|fault| ApiError::Internal(fault.to_string()))??;

    Ok(Json(JobsResponse::new(source.name(), jobs, Vec::new())))
}

pub async fn linkedin_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<JobsResponse>> {
    single_source(&state, JobSource::LinkedIn, JobQuery::from_pairs(pairs).into()).await
}

/// Naukri only understands keyword and limit; other filters are dropped.
pub async fn naukri_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<JobsResponse>> {
    let query = JobQuery::from_pairs(pairs);
    let params = QueryParameters::from(JobQuery {
        keyword: query.keyword,
        limit: query.limit,
        ..JobQuery::default()
    });
    single_source(&state, JobSource::Naukri, params).await
}

pub async fn all_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<JobsResponse>> {
    let params = QueryParameters::from(JobQuery::from_pairs(pairs));
    let combined = state
        .aggregator
        .aggregate_all(&params, &JobSource::ALL)
        .await
        .map_err(ApiError::Combined)?;

    Ok(Json(JobsResponse::new(COMBINED, combined.jobs, combined.errors)))
}
