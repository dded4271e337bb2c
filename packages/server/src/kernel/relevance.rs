//! Tech-relevance filter.
//!
//! Plain substring matching over the lower-cased title and description.
//! There are no word boundaries, so "java" also hits "javascript"; both are tech terms.

use crate::common::Job;

/// Keywords used when none are configured.
pub const DEFAULT_TECH_KEYWORDS: &[&str] = &[
    "software",
    "developer",
    "engineer",
    "data",
    "devops",
    "frontend",
    "backend",
    "fullstack",
    "cloud",
    "architect",
    "security",
    "machine learning",
    "ai",
    "data science",
    "system",
    "network",
    "react",
    "angular",
    "python",
    "nodejs",
    "ops",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "sql",
    "nosql",
    "linux",
    "unix",
    "javascript",
    "java",
    "c++",
    "golang",
    "rust",
    "kotlin",
    "typescript",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TECH_KEYWORDS.iter().copied())
    }
}

impl RelevanceFilter {
    /// Build a filter from a keyword set. Keywords are lower-cased, blanks dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_relevant_text(&self, title: &str, description: &str) -> bool {
        let text = format!("{} {}", title, description).to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn is_tech_relevant(&self, job: &Job) -> bool {
        self.is_relevant_text(&job.title, &job.description)
    }
}
