// Trait definitions for dependency injection
//
// Collaborator traits (Base*Provider, Base*Fetcher) are INFRASTRUCTURE only:
// they fetch raw data and know nothing about the canonical schema.
// BaseJobSource is the adapter contract the aggregator dispatches on.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{Job, JobSource, QueryParameters, RawRecord};
use crate::kernel::errors::SourceFetchError;

// =============================================================================
// Source Adapter Trait
// =============================================================================

#[async_trait]
pub trait BaseJobSource: Send + Sync {
    /// Which source this adapter serves
    fn source(&self) -> JobSource;

    /// Fetch, normalize and filter jobs. All-or-nothing: any failure yields
    /// a single SourceFetchError and no partial results.
    async fn fetch(&self, params: &QueryParameters) -> Result<Vec<Job>, SourceFetchError>;
}

// =============================================================================
// Structured Job Search Trait (Infrastructure)
// =============================================================================

/// Request handed to a structured job-search provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSearchRequest {
    pub keyword: String,
    pub location: String,
    pub limit: u32,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_filter: Option<String>,
}

#[async_trait]
pub trait BaseJobSearchProvider: Send + Sync {
    /// Run a search and return raw records (field names are provider-specific)
    async fn search(&self, request: &JobSearchRequest) -> Result<Vec<RawRecord>>;
}

// =============================================================================
// Markup Fetcher Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseMarkupFetcher: Send + Sync {
    /// GET a page and return its raw document text
    async fn fetch_markup(&self, url: &str) -> Result<String>;
}
