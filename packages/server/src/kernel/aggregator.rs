//! Fan-out/fan-in over the registered source adapters.
//!
//! Every requested source is dispatched before any is awaited, and all of
//! them are allowed to settle. A failing source becomes an entry in
//! `errors`; it never aborts the others. Jobs are concatenated in dispatch
//! order regardless of which source finishes first.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::info;

use super::errors::{AggregationFault, SourceFetchError};
use super::BaseJobSource;
use crate::common::{Job, JobSource, QueryParameters};

/// Settled outcome of one adapter invocation.
#[derive(Debug)]
pub enum SourceResult {
    Success { source: JobSource, jobs: Vec<Job> },
    Failure { source: JobSource, message: String },
}

impl SourceResult {
    fn settle(source: JobSource, outcome: Result<Vec<Job>, SourceFetchError>) -> Self {
        match outcome {
            Ok(jobs) => SourceResult::Success { source, jobs },
            Err(e) => SourceResult::Failure {
                source,
                message: e.to_string(),
            },
        }
    }
}

/// One failed source in a combined fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceError {
    pub source: JobSource,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct AggregatedJobs {
    pub jobs: Vec<Job>,
    pub errors: Vec<SourceError>,
}

impl AggregatedJobs {
    fn from_results(results: Vec<SourceResult>) -> Self {
        let mut combined = Self::default();
        for result in results {
            match result {
                SourceResult::Success { jobs, .. } => combined.jobs.extend(jobs),
                SourceResult::Failure { source, message } => {
                    combined.errors.push(SourceError { source, message })
                }
            }
        }
        combined
    }
}

/// Registry of source adapters, in registration order.
#[derive(Clone, Default)]
pub struct Aggregator {
    sources: Vec<Arc<dyn BaseJobSource>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter. A later registration for the same source replaces the earlier one.
    pub fn with_source(mut self, adapter: Arc<dyn BaseJobSource>) -> Self {
        let source = adapter.source();
        self.sources.retain(|s| s.source() != source);
        self.sources.push(adapter);
        self
    }

    /// Registered sources, in registration order
    pub fn sources(&self) -> Vec<JobSource> {
        self.sources.iter().map(|s| s.source()).collect()
    }

    fn adapter(&self, source: JobSource) -> Result<&Arc<dyn BaseJobSource>, AggregationFault> {
        self.sources
            .iter()
            .find(|s| s.source() == source)
            .ok_or(AggregationFault::SourceNotRegistered(source))
    }

    /// Query a single source. The adapter's own error is returned in the
    /// inner result; the outer one only reports wiring faults.
    pub async fn fetch_one(
        &self,
        source: JobSource,
        params: &QueryParameters,
    ) -> Result<Result<Vec<Job>, SourceFetchError>, AggregationFault> {
        let adapter = self.adapter(source)?;
        Ok(adapter.fetch(params).await)
    }

    /// Query every listed source concurrently and merge the settled results.
    pub async fn aggregate_all(
        &self,
        params: &QueryParameters,
        sources: &[JobSource],
    ) -> Result<AggregatedJobs, AggregationFault> {
        let adapters = sources
            .iter()
            .map(|source| self.adapter(*source))
            .collect::<Result<Vec<_>, _>>()?;

        let dispatched = adapters.into_iter().map(|adapter| async move {
            let source = adapter.source();
            SourceResult::settle(source, adapter.fetch(params).await)
        });
        let results = join_all(dispatched).await;

        let combined = AggregatedJobs::from_results(results);
        info!(
            sources = sources.len(),
            jobs = combined.jobs.len(),
            failed = combined.errors.len(),
            "Combined fetch complete"
        );
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockJobSource;
    use std::time::Duration;
    use tokio::sync::Barrier;

    const BOTH: [JobSource; 2] = [JobSource::LinkedIn, JobSource::Naukri];

    #[tokio::test]
    async fn test_partial_failure_keeps_successful_jobs() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(MockJobSource::new(JobSource::LinkedIn).with_jobs(3)))
            .with_source(Arc::new(
                MockJobSource::new(JobSource::Naukri).failing("connection reset"),
            ));

        let combined = aggregator
            .aggregate_all(&QueryParameters::default(), &BOTH)
            .await
            .unwrap();

        assert_eq!(combined.jobs.len(), 3);
        assert!(combined.jobs.iter().all(|j| j.source == JobSource::LinkedIn));
        assert_eq!(
            combined.errors,
            vec![SourceError {
                source: JobSource::Naukri,
                message: "Failed to scrape Naukri jobs.".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_results_follow_dispatch_order_not_completion_order() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(
                MockJobSource::new(JobSource::LinkedIn)
                    .with_jobs(2)
                    .with_delay(Duration::from_millis(50)),
            ))
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri).with_jobs(2)));

        let combined = aggregator
            .aggregate_all(&QueryParameters::default(), &BOTH)
            .await
            .unwrap();

        let ids: Vec<_> = combined.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["linkedin-1", "linkedin-2", "naukri-1", "naukri-2"]);
        assert!(combined.errors.is_empty());

        let reversed = aggregator
            .aggregate_all(&QueryParameters::default(), &[JobSource::Naukri, JobSource::LinkedIn])
            .await
            .unwrap();
        let ids: Vec<_> = reversed.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["naukri-1", "naukri-2", "linkedin-1", "linkedin-2"]);
    }

    #[tokio::test]
    async fn test_sources_are_dispatched_concurrently() {
        // Each source waits for the other to start; sequential dispatch would hang.
        let barrier = Arc::new(Barrier::new(2));
        let aggregator = Aggregator::new()
            .with_source(Arc::new(
                MockJobSource::new(JobSource::LinkedIn)
                    .with_jobs(1)
                    .with_barrier(barrier.clone()),
            ))
            .with_source(Arc::new(
                MockJobSource::new(JobSource::Naukri)
                    .with_jobs(1)
                    .with_barrier(barrier),
            ));

        let combined = tokio::time::timeout(
            Duration::from_secs(5),
            aggregator.aggregate_all(&QueryParameters::default(), &BOTH),
        )
        .await
        .expect("sources were not dispatched concurrently")
        .unwrap();

        assert_eq!(combined.jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_slow_success_still_awaited_after_fast_failure() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(
                MockJobSource::new(JobSource::LinkedIn)
                    .with_jobs(2)
                    .with_delay(Duration::from_millis(30)),
            ))
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri).failing("timeout")));

        let combined = aggregator
            .aggregate_all(&QueryParameters::default(), &BOTH)
            .await
            .unwrap();

        assert_eq!(combined.jobs.len(), 2);
        assert_eq!(combined.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_not_a_fault() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(MockJobSource::new(JobSource::LinkedIn).failing("a")))
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri).failing("b")));

        let combined = aggregator
            .aggregate_all(&QueryParameters::default(), &BOTH)
            .await
            .unwrap();

        assert!(combined.jobs.is_empty());
        assert_eq!(combined.errors.len(), 2);
        assert_eq!(combined.errors[0].source, JobSource::LinkedIn);
    }

    #[tokio::test]
    async fn test_unregistered_source_is_an_aggregation_fault() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(MockJobSource::new(JobSource::LinkedIn).with_jobs(1)));

        let err = aggregator
            .aggregate_all(&QueryParameters::default(), &BOTH)
            .await
            .unwrap_err();

        assert!(matches!(err, AggregationFault::SourceNotRegistered(JobSource::Naukri)));
    }

    #[tokio::test]
    async fn test_params_are_shared_with_every_source() {
        let linkedin = Arc::new(MockJobSource::new(JobSource::LinkedIn));
        let naukri = Arc::new(MockJobSource::new(JobSource::Naukri));
        let aggregator = Aggregator::new()
            .with_source(linkedin.clone())
            .with_source(naukri.clone());
        let params = QueryParameters::default().with_keyword("rust").with_limit(4);

        aggregator.aggregate_all(&params, &BOTH).await.unwrap();

        assert_eq!(linkedin.calls(), vec![params.clone()]);
        assert_eq!(naukri.calls(), vec![params]);
    }

    #[tokio::test]
    async fn test_fetch_one_separates_source_errors_from_faults() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri).failing("boom")));

        let inner = aggregator
            .fetch_one(JobSource::Naukri, &QueryParameters::default())
            .await
            .unwrap();
        assert!(inner.is_err());

        let fault = aggregator
            .fetch_one(JobSource::LinkedIn, &QueryParameters::default())
            .await;
        assert!(fault.is_err());
    }

    #[test]
    fn test_reregistering_replaces_adapter() {
        let aggregator = Aggregator::new()
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri)))
            .with_source(Arc::new(MockJobSource::new(JobSource::LinkedIn)))
            .with_source(Arc::new(MockJobSource::new(JobSource::Naukri)));

        assert_eq!(aggregator.sources(), vec![JobSource::LinkedIn, JobSource::Naukri]);
    }
}
