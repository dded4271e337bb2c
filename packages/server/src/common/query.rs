// Query parameters shared by every source adapter.

use serde::Deserialize;

pub const DEFAULT_KEYWORD: &str = "tech";
pub const DEFAULT_LIMIT: u32 = 10;

/// Query string exactly as received. Everything is a string so malformed
/// input never fails extraction; [`QueryParameters`] does the coercion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    pub keyword: Option<String>,
    pub limit: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_filter: Option<String>,
}

impl JobQuery {
    /// Build from raw query-string pairs. The first value of a repeated key
    /// wins and unknown keys are ignored, so no query string is ever rejected.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "keyword" => &mut query.keyword,
                "limit" => &mut query.limit,
                "location" => &mut query.location,
                "experienceLevel" => &mut query.experience_level,
                "jobType" => &mut query.job_type,
                "remoteFilter" => &mut query.remote_filter,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Validated, defaulted search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub keyword: String,
    /// Always at least 1.
    pub limit: u32,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_filter: Option<String>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            limit: DEFAULT_LIMIT,
            location: None,
            experience_level: None,
            job_type: None,
            remote_filter: None,
        }
    }
}

impl QueryParameters {
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}

/// Zero, negative, or non-numeric input falls back to [`DEFAULT_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl From<JobQuery> for QueryParameters {
    fn from(query: JobQuery) -> Self {
        Self {
            limit: parse_limit(query.limit.as_deref()),
            keyword: non_empty(query.keyword).unwrap_or_else(|| DEFAULT_KEYWORD.to_string()),
            location: non_empty(query.location),
            experience_level: non_empty(query.experience_level),
            job_type: non_empty(query.job_type),
            remote_filter: non_empty(query.remote_filter),
        }
    }
}
