use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for a LinkedIn job-search actor.
///
/// Optional filters are omitted from the payload when unset so the actor
/// applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInJobsInput {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_filter: Option<String>,
}

/// A single dataset item, kept as an untyped JSON object.
///
/// Job actors disagree on field names, so mapping to a schema is left to
/// the caller.
pub type DatasetItem = serde_json::Map<String, serde_json::Value>;

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
