// Canonical job record shared by every source adapter and the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder stored in any job field the source did not provide.
pub const SENTINEL: &str = "N/A";

/// Raw record as handed back by a source before normalization.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Provenance of a job listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSource {
    LinkedIn,
    Naukri,
}

impl JobSource {
    /// Every known source, in combined-fetch dispatch order.
    pub const ALL: [JobSource; 2] = [JobSource::LinkedIn, JobSource::Naukri];

    /// Display name used in responses and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            JobSource::LinkedIn => "LinkedIn",
            JobSource::Naukri => "Naukri",
        }
    }

    /// Parse a source tag such as `"linkedin"` (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Some(JobSource::LinkedIn),
            "naukri" => Some(JobSource::Naukri),
            _ => None,
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized job listing. Every field is populated, missing data holds [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub posted_date: String,
    pub source: JobSource,
    pub experience_level: String,
    pub job_type: String,
}
