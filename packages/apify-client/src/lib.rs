//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! polling for completion, and fetching dataset results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, LinkedInJobsInput};
//!
//! let client = ApifyClient::new("your-api-token".into())?;
//!
//! let input = LinkedInJobsInput {
//!     keyword: "rust developer".into(),
//!     limit: 10,
//!     ..Default::default()
//! };
//! let items = client
//!     .scrape_linkedin_jobs("curious_coder~linkedin-jobs-scraper", &input)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{DatasetItem, LinkedInJobsInput, RunData};

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Covers one `waitForFinish=60` long-poll plus slack.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Long-polls allowed before a run counts as stuck (about ten minutes).
pub const DEFAULT_MAX_POLLS: u32 = 10;

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    max_polls: u32,
}

impl ApifyClient {
    pub fn new(token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// Cap the number of status polls in [`ApifyClient::wait_for_run`] (at least 1).
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls.max(1);
        self
    }

    /// Point the client at a different API root (used for local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp)
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = Self::check(resp).await?.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    ///
    /// Gives up with [`ApifyError::RunTimedOut`] once `max_polls` polls have
    /// all reported a non-terminal status.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        for poll in 1..=self.max_polls {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish=60",
                self.base_url, run_id
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let api_resp: ApiResponse<RunData> = Self::check(resp).await?.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(api_resp.data.status));
                }
                _ => {
                    tracing::debug!(run_id, poll, status = %api_resp.data.status, "Run still in progress");
                }
            }
        }

        tracing::warn!(run_id, polls = self.max_polls, "Apify run did not finish in time");
        Err(ApifyError::RunTimedOut {
            run_id: run_id.to_string(),
            polls: self.max_polls,
        })
    }

    /// Fetch dataset items from a completed run, optionally capped at `limit`.
    pub async fn get_dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<T>> {
        let mut url = format!(
            "{}/datasets/{}/items?format=json",
            self.base_url, dataset_id
        );
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={}", limit));
        }

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let items: Vec<T> = Self::check(resp).await?.json().await?;
        Ok(items)
    }

    /// Run a LinkedIn job-search actor end-to-end: start run, poll, fetch results.
    pub async fn scrape_linkedin_jobs(
        &self,
        actor_id: &str,
        input: &LinkedInJobsInput,
    ) -> Result<Vec<DatasetItem>> {
        tracing::info!(
            actor_id,
            keyword = %input.keyword,
            limit = input.limit,
            "Starting LinkedIn job scrape"
        );

        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let items: Vec<DatasetItem> = self
            .get_dataset_items(&completed.default_dataset_id, Some(input.limit))
            .await?;
        tracing::info!(count = items.len(), "Fetched LinkedIn job items");

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ACTOR: &str = "acme~linkedin-jobs";

    fn input() -> LinkedInJobsInput {
        LinkedInJobsInput {
            keyword: "rust".to_string(),
            location: Some("Pune".to_string()),
            limit: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_input_omits_unset_filters() {
        let value = serde_json::to_value(input()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"keyword": "rust", "location": "Pune", "limit": 2})
        );
    }

    #[tokio::test]
    async fn test_scrape_linkedin_jobs_runs_polls_and_fetches() {
        let mut server = mockito::Server::new_async().await;
        let start = server
            .mock("POST", "/acts/acme~linkedin-jobs/runs")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(serde_json::json!({"keyword": "rust"})))
            .with_status(201)
            .with_body(r#"{"data":{"id":"run-1","status":"RUNNING","defaultDatasetId":"ds-1"}}"#)
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/actor-runs/run-1")
            .match_query(Matcher::UrlEncoded("waitForFinish".into(), "60".into()))
            .with_status(200)
            .with_body(r#"{"data":{"id":"run-1","status":"SUCCEEDED","defaultDatasetId":"ds-1"}}"#)
            .create_async()
            .await;
        let items = server
            .mock("GET", "/datasets/ds-1/items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"jobId":"1","title":"Rust Engineer"},{"jobId":"2","title":"SRE"}]"#)
            .create_async()
            .await;

        let client = ApifyClient::new("secret".into())
            .unwrap()
            .with_base_url(server.url());
        let result = client.scrape_linkedin_jobs(ACTOR, &input()).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["title"], "Rust Engineer");
        start.assert_async().await;
        poll.assert_async().await;
        items.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_run_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/acts/acme~linkedin-jobs/runs")
            .with_status(201)
            .with_body(r#"{"data":{"id":"run-2","status":"READY","defaultDatasetId":"ds-2"}}"#)
            .create_async()
            .await;
        let _poll = server
            .mock("GET", "/actor-runs/run-2")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":{"id":"run-2","status":"FAILED","defaultDatasetId":"ds-2"}}"#)
            .create_async()
            .await;

        let client = ApifyClient::new("secret".into())
            .unwrap()
            .with_base_url(server.url());
        let err = client.scrape_linkedin_jobs(ACTOR, &input()).await.unwrap_err();

        assert!(matches!(err, ApifyError::RunFailed(ref status) if status == "FAILED"));
    }

    #[tokio::test]
    async fn test_run_stuck_in_progress_gives_up_after_max_polls() {
        let mut server = mockito::Server::new_async().await;
        let poll = server
            .mock("GET", "/actor-runs/run-3")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":{"id":"run-3","status":"RUNNING","defaultDatasetId":"ds-3"}}"#)
            .expect(3)
            .create_async()
            .await;

        let client = ApifyClient::new("secret".into())
            .unwrap()
            .with_base_url(server.url())
            .with_max_polls(3);
        let err = client.wait_for_run("run-3").await.unwrap_err();

        match err {
            ApifyError::RunTimedOut { run_id, polls } => {
                assert_eq!(run_id, "run-3");
                assert_eq!(polls, 3);
            }
            other => panic!("expected RunTimedOut, got {:?}", other),
        }
        poll.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/acts/acme~linkedin-jobs/runs")
            .with_status(401)
            .with_body("invalid token")
            .create_async()
            .await;

        let client = ApifyClient::new("bad".into())
            .unwrap()
            .with_base_url(server.url());
        let err = client.start_run(ACTOR, &input()).await.unwrap_err();

        match err {
            ApifyError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid token");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
