//! Structured LinkedIn job search backed by an Apify actor.

use anyhow::{Context, Result};
use apify_client::{ApifyClient, LinkedInJobsInput};
use async_trait::async_trait;

use super::{BaseJobSearchProvider, JobSearchRequest};
use crate::common::RawRecord;

/// Default Apify actor for LinkedIn job searches
pub const DEFAULT_LINKEDIN_ACTOR: &str = "curious_coder~linkedin-jobs-scraper";

pub struct ApifyJobSearchProvider {
    client: ApifyClient,
    actor_id: String,
}

impl ApifyJobSearchProvider {
    pub fn new(client: ApifyClient, actor_id: impl Into<String>) -> Self {
        Self {
            client,
            actor_id: actor_id.into(),
        }
    }
}

fn actor_input(request: &JobSearchRequest) -> LinkedInJobsInput {
    LinkedInJobsInput {
        keyword: request.keyword.clone(),
        location: Some(request.location.clone()),
        limit: request.limit,
        experience_level: request.experience_level.clone(),
        job_type: request.job_type.clone(),
        remote_filter: request.remote_filter.clone(),
    }
}

#[async_trait]
impl BaseJobSearchProvider for ApifyJobSearchProvider {
    async fn search(&self, request: &JobSearchRequest) -> Result<Vec<RawRecord>> {
        let input = actor_input(request);
        self.client
            .scrape_linkedin_jobs(&self.actor_id, &input)
            .await
            .context("Apify LinkedIn search failed")
    }
}

/// Stand-in used when no Apify token is configured. Every search fails, so
/// the LinkedIn source reports an error instead of disappearing.
pub struct UnconfiguredSearchProvider;

#[async_trait]
impl BaseJobSearchProvider for UnconfiguredSearchProvider {
    async fn search(&self, _request: &JobSearchRequest) -> Result<Vec<RawRecord>> {
        anyhow::bail!("APIFY_API_TOKEN is not set; structured job search is unavailable")
    }
}
