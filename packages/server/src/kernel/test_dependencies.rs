// Mock implementations for testing
//
// Each mock records the calls it receives and replays canned responses, so
// adapters and the aggregator can be exercised without network access.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

use super::errors::SourceFetchError;
use super::{BaseJobSearchProvider, BaseJobSource, BaseMarkupFetcher, JobSearchRequest};
use crate::common::{Job, JobSource, QueryParameters, RawRecord, SENTINEL};

// =============================================================================
// Mock Job Search Provider
// =============================================================================

pub struct MockJobSearchProvider {
    records: Vec<RawRecord>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<JobSearchRequest>>>,
}

impl MockJobSearchProvider {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every search fails with this message
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Records returned by every search. Non-object values are skipped.
    pub fn with_records(mut self, records: Vec<serde_json::Value>) -> Self {
        self.records = records
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self
    }

    /// Get all requests that were made
    pub fn calls(&self) -> Vec<JobSearchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockJobSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseJobSearchProvider for MockJobSearchProvider {
    async fn search(&self, request: &JobSearchRequest) -> Result<Vec<RawRecord>> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.records.clone()),
        }
    }
}

// =============================================================================
// Mock Markup Fetcher
// =============================================================================

pub struct MockMarkupFetcher {
    page: String,
    failure: Option<String>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockMarkupFetcher {
    pub fn new() -> Self {
        Self {
            page: String::new(),
            failure: None,
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Document returned for every URL
    pub fn with_page(mut self, html: impl Into<String>) -> Self {
        self.page = html.into();
        self
    }

    /// Get all URLs that were fetched
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Default for MockMarkupFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMarkupFetcher for MockMarkupFetcher {
    async fn fetch_markup(&self, url: &str) -> Result<String> {
        self.urls.lock().unwrap().push(url.to_string());
        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.page.clone()),
        }
    }
}

// =============================================================================
// Mock Job Source
// =============================================================================

/// Build a tech job with the given id and title; other fields hold the sentinel.
pub fn sample_job(source: JobSource, id: &str, title: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        company: SENTINEL.to_string(),
        location: SENTINEL.to_string(),
        description: SENTINEL.to_string(),
        link: SENTINEL.to_string(),
        posted_date: SENTINEL.to_string(),
        source,
        experience_level: SENTINEL.to_string(),
        job_type: SENTINEL.to_string(),
    }
}

/// Source adapter with scripted output, optional latency, and an optional
/// rendezvous barrier for proving concurrent dispatch.
pub struct MockJobSource {
    source: JobSource,
    jobs: Vec<Job>,
    failure: Option<String>,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
    calls: Arc<Mutex<Vec<QueryParameters>>>,
}

impl MockJobSource {
    pub fn new(source: JobSource) -> Self {
        Self {
            source,
            jobs: Vec::new(),
            failure: None,
            delay: None,
            barrier: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Succeed with `count` jobs titled "<Source> Engineer <n>"
    pub fn with_jobs(mut self, count: usize) -> Self {
        self.jobs = (1..=count)
            .map(|n| {
                sample_job(
                    self.source,
                    &format!("{}-{}", self.source.name().to_lowercase(), n),
                    &format!("{} Engineer {}", self.source, n),
                )
            })
            .collect();
        self
    }

    /// Fail with this technical detail (wrapped like a real adapter)
    pub fn failing(mut self, detail: &str) -> Self {
        self.failure = Some(detail.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Wait on `barrier` before settling
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> Vec<QueryParameters> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseJobSource for MockJobSource {
    fn source(&self) -> JobSource {
        self.source
    }

    async fn fetch(&self, params: &QueryParameters) -> Result<Vec<Job>, SourceFetchError> {
        self.calls.lock().unwrap().push(params.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some(detail) => Err(SourceFetchError::wrap(
                self.source,
                anyhow::anyhow!("{}", detail),
            )),
            None => Ok(self.jobs.clone()),
        }
    }
}
