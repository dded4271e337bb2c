// Error types for the aggregation pipeline

use thiserror::Error;

use crate::common::JobSource;

/// A source adapter failed. Only the source-identifying message is shown
/// to callers; the underlying cause stays reachable through `source()`.
#[derive(Debug, Error)]
#[error("Failed to scrape {job_source} jobs.")]
pub struct SourceFetchError {
    pub job_source: JobSource,
    #[source]
    pub detail: anyhow::Error,
}

impl SourceFetchError {
    /// Log the technical detail, then wrap it.
    pub fn wrap(job_source: JobSource, detail: anyhow::Error) -> Self {
        tracing::error!(source = %job_source, error = ?detail, "{} scraping error", job_source);
        Self { job_source, detail }
    }
}

/// A defect in the aggregation logic itself, not attributable to one source.
#[derive(Debug, Error)]
pub enum AggregationFault {
    #[error("no adapter registered for source {0}")]
    SourceNotRegistered(JobSource),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_hides_technical_detail() {
        let err = SourceFetchError::wrap(
            JobSource::Naukri,
            anyhow::anyhow!("HTTP 503 for https://www.naukri.com/tech-jobs"),
        );
        assert_eq!(err.to_string(), "Failed to scrape Naukri jobs.");
        assert!(std::error::Error::source(&err)
            .map(|e| e.to_string().contains("503"))
            .unwrap_or(false));
    }
}
