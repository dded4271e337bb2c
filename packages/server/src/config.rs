use anyhow::{Context, Result};
use apify_client::DEFAULT_MAX_POLLS;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::apify_provider::DEFAULT_LINKEDIN_ACTOR;
use crate::kernel::sources::{linkedin, naukri};

/// Per-IP rate limiting settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per IP before throttling kicks in
    pub max_requests: u32,
    /// Time for a fully drained quota to replenish
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub apify_api_token: Option<String>,
    pub apify_linkedin_actor: String,
    /// Long-polls allowed before a LinkedIn actor run counts as failed
    pub apify_max_polls: u32,
    pub linkedin_default_location: String,
    pub naukri_base_url: String,
    pub source_timeout: Duration,
    /// Replaces the built-in tech keyword list when set
    pub tech_keywords: Option<Vec<String>>,
    pub rate_limit: RateLimitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            apify_api_token: None,
            apify_linkedin_actor: DEFAULT_LINKEDIN_ACTOR.to_string(),
            apify_max_polls: DEFAULT_MAX_POLLS,
            linkedin_default_location: linkedin::DEFAULT_LOCATION.to_string(),
            naukri_base_url: naukri::DEFAULT_BASE_URL.to_string(),
            source_timeout: Duration::from_secs(30),
            tech_keywords: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            port: var("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid number")?
                .unwrap_or(defaults.port),
            apify_api_token: var("APIFY_API_TOKEN"),
            apify_linkedin_actor: var("APIFY_LINKEDIN_ACTOR")
                .unwrap_or(defaults.apify_linkedin_actor),
            apify_max_polls: var("APIFY_MAX_POLLS")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("APIFY_MAX_POLLS must be a valid number")?
                .unwrap_or(defaults.apify_max_polls)
                .max(1),
            linkedin_default_location: var("LINKEDIN_DEFAULT_LOCATION")
                .unwrap_or(defaults.linkedin_default_location),
            naukri_base_url: var("NAUKRI_BASE_URL").unwrap_or(defaults.naukri_base_url),
            source_timeout: var("SOURCE_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("SOURCE_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(defaults.source_timeout),
            tech_keywords: var("TECH_KEYWORDS").map(|v| {
                v.split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            }),
            rate_limit: RateLimitConfig {
                enabled: var("RATE_LIMIT_ENABLED")
                    .map(|v| parse_bool(&v))
                    .transpose()
                    .context("RATE_LIMIT_ENABLED must be true or false")?
                    .unwrap_or(defaults.rate_limit.enabled),
                max_requests: var("RATE_LIMIT_MAX_REQUESTS")
                    .map(|v| v.parse::<u32>())
                    .transpose()
                    .context("RATE_LIMIT_MAX_REQUESTS must be a valid number")?
                    .unwrap_or(defaults.rate_limit.max_requests),
                window: var("RATE_LIMIT_WINDOW_SECS")
                    .map(|v| v.parse::<u64>().map(Duration::from_secs))
                    .transpose()
                    .context("RATE_LIMIT_WINDOW_SECS must be a whole number of seconds")?
                    .unwrap_or(defaults.rate_limit.window),
            },
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.apify_api_token.is_none());
        assert_eq!(config.linkedin_default_location, "India");
        assert_eq!(config.naukri_base_url, "https://www.naukri.com/");
        assert_eq!(config.source_timeout, Duration::from_secs(30));
        assert_eq!(config.apify_max_polls, 10);
        assert!(config.tech_keywords.is_none());
        assert_eq!(config.rate_limit, RateLimitConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("APIFY_API_TOKEN", "apify_api_abc"),
            ("APIFY_MAX_POLLS", "3"),
            ("TECH_KEYWORDS", "rust, go ,,zig"),
            ("RATE_LIMIT_ENABLED", "false"),
            ("RATE_LIMIT_MAX_REQUESTS", "5"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.apify_api_token.as_deref(), Some("apify_api_abc"));
        assert_eq!(config.apify_max_polls, 3);
        assert_eq!(
            config.tech_keywords,
            Some(vec!["rust".to_string(), "go".to_string(), "zig".to_string()])
        );
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
    }

    #[test]
    fn test_blank_token_is_unset() {
        let config = config(&[("APIFY_API_TOKEN", "  ")]).unwrap();
        assert!(config.apify_api_token.is_none());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(config(&[("RATE_LIMIT_ENABLED", "maybe")]).is_err());
        assert!(config(&[("SOURCE_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config(&[("APIFY_MAX_POLLS", "forever")]).is_err());
    }
}
