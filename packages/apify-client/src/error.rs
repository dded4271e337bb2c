//! Error types for Apify client.

use thiserror::Error;

/// Result type for Apify client operations.
pub type Result<T> = std::result::Result<T, ApifyError>;

/// Apify client errors.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Transport error (connection failed, timeout, undecodable body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Apify API
    #[error("Apify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Actor run finished in a terminal non-success state
    #[error("Apify run ended with status {0}")]
    RunFailed(String),

    /// Run was still in progress after the last allowed poll
    #[error("Apify run {run_id} did not finish after {polls} polls")]
    RunTimedOut { run_id: String, polls: u32 },
}
