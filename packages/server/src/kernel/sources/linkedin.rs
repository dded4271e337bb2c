//! LinkedIn adapter over a structured job-search provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::normalize_and_filter;
use crate::common::{Job, JobSource, QueryParameters};
use crate::kernel::errors::SourceFetchError;
use crate::kernel::normalizer::FieldMappings;
use crate::kernel::relevance::RelevanceFilter;
use crate::kernel::{BaseJobSearchProvider, BaseJobSource, JobSearchRequest};

/// Location sent to the provider when the query has none
pub const DEFAULT_LOCATION: &str = "India";

pub struct LinkedInSource {
    provider: Arc<dyn BaseJobSearchProvider>,
    mappings: Arc<FieldMappings>,
    filter: Arc<RelevanceFilter>,
    default_location: String,
}

impl LinkedInSource {
    pub fn new(
        provider: Arc<dyn BaseJobSearchProvider>,
        mappings: Arc<FieldMappings>,
        filter: Arc<RelevanceFilter>,
    ) -> Self {
        Self {
            provider,
            mappings,
            filter,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn build_request(&self, params: &QueryParameters) -> JobSearchRequest {
        JobSearchRequest {
            keyword: params.keyword.clone(),
            location: params
                .location
                .clone()
                .unwrap_or_else(|| self.default_location.clone()),
            limit: params.limit,
            experience_level: params.experience_level.clone(),
            job_type: params.job_type.clone(),
            remote_filter: params.remote_filter.clone(),
        }
    }
}

#[async_trait]
impl BaseJobSource for LinkedInSource {
    fn source(&self) -> JobSource {
        JobSource::LinkedIn
    }

    async fn fetch(&self, params: &QueryParameters) -> Result<Vec<Job>, SourceFetchError> {
        let request = self.build_request(params);
        debug!(keyword = %request.keyword, location = %request.location, limit = request.limit, "Searching LinkedIn");

        let records = self
            .provider
            .search(&request)
            .await
            .map_err(|e| SourceFetchError::wrap(JobSource::LinkedIn, e))?;

        let fetched = records.len();
        let records = records.into_iter().take(params.limit as usize);
        let jobs = normalize_and_filter(records, JobSource::LinkedIn, &self.mappings, &self.filter);

        info!(fetched, relevant = jobs.len(), "LinkedIn fetch complete");
        Ok(jobs)
    }
}
