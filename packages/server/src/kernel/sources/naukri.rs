//! Naukri adapter: scrapes the public search results page.
//!
//! Selectors are tied to one page layout. When it changes, fields degrade to
//! the sentinel instead of failing; a block where every field is missing is
//! logged as likely structural drift.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::normalize_and_filter;
use crate::common::{Job, JobSource, QueryParameters, RawRecord};
use crate::kernel::errors::SourceFetchError;
use crate::kernel::normalizer::FieldMappings;
use crate::kernel::relevance::RelevanceFilter;
use crate::kernel::{BaseJobSource, BaseMarkupFetcher};

pub const DEFAULT_BASE_URL: &str = "https://www.naukri.com/";

/// Listing pages carry no description; fetching it needs one request per job.
pub const DESCRIPTION_PLACEHOLDER: &str = "N/A (Requires deep scraping)";

const RESULT_BLOCK: &str = ".jobTuple.bgWhite";
const TITLE: &str = ".title.fw500";
const COMPANY: &str = ".companyInfo.subTitle.ellipsis";
const LOCATION: &str = ".location.locWdth";
const EXPERIENCE: &str = ".experience";

struct ResultSelectors {
    block: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    experience: Selector,
}

impl ResultSelectors {
    fn new() -> Result<Self> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))
        };
        Ok(Self {
            block: parse(RESULT_BLOCK)?,
            title: parse(TITLE)?,
            company: parse(COMPANY)?,
            location: parse(LOCATION)?,
            experience: parse(EXPERIENCE)?,
        })
    }
}

/// Lower-case the keyword and replace each whitespace character with `-`.
pub fn slugify(keyword: &str) -> String {
    keyword
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

pub fn search_url(base_url: &str, keyword: &str) -> String {
    let separator = if base_url.ends_with('/') { "" } else { "/" };
    format!("{}{}{}-jobs", base_url, separator, slugify(keyword))
}

fn first_text(block: &ElementRef<'_>, selector: &Selector) -> String {
    block
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn resolve_link(search_url: &str, href: Option<&str>) -> Option<String> {
    let href = href.map(str::trim).filter(|h| !h.is_empty())?;
    match Url::parse(search_url).and_then(|base| base.join(href)) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Some(href.to_string()),
    }
}

/// Pull up to `limit` raw records out of a results page.
///
/// Missing fields are left empty for the normalizer to replace; a missing
/// link falls back to `search_url`.
pub fn extract_raw_jobs(html: &str, search_url: &str, limit: usize) -> Result<Vec<RawRecord>> {
    let selectors = ResultSelectors::new()?;
    let document = Html::parse_document(html);

    let records = document
        .select(&selectors.block)
        .take(limit)
        .enumerate()
        .map(|(idx, block)| {
            let title = first_text(&block, &selectors.title);
            let company = first_text(&block, &selectors.company);
            let location = first_text(&block, &selectors.location);
            let experience = first_text(&block, &selectors.experience);
            let href = block
                .select(&selectors.title)
                .next()
                .and_then(|el| el.value().attr("href"));
            let link = resolve_link(search_url, href);

            if title.is_empty()
                && company.is_empty()
                && location.is_empty()
                && experience.is_empty()
                && link.is_none()
            {
                warn!(
                    idx,
                    search_url, "Naukri result block matched no field selectors; page layout may have changed"
                );
            }

            let mut raw = RawRecord::new();
            raw.insert("title".into(), Value::String(title));
            raw.insert("company".into(), Value::String(company));
            raw.insert("location".into(), Value::String(location));
            raw.insert("experience".into(), Value::String(experience));
            raw.insert(
                "link".into(),
                Value::String(link.unwrap_or_else(|| search_url.to_string())),
            );
            raw.insert(
                "description".into(),
                Value::String(DESCRIPTION_PLACEHOLDER.to_string()),
            );
            raw
        })
        .collect();

    Ok(records)
}

pub struct NaukriSource {
    fetcher: Arc<dyn BaseMarkupFetcher>,
    mappings: Arc<FieldMappings>,
    filter: Arc<RelevanceFilter>,
    base_url: String,
}

impl NaukriSource {
    pub fn new(
        fetcher: Arc<dyn BaseMarkupFetcher>,
        mappings: Arc<FieldMappings>,
        filter: Arc<RelevanceFilter>,
    ) -> Self {
        Self {
            fetcher,
            mappings,
            filter,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn scrape(&self, params: &QueryParameters) -> Result<Vec<Job>> {
        let url = search_url(&self.base_url, &params.keyword);
        debug!(url = %url, limit = params.limit, "Scraping Naukri");

        let html = self.fetcher.fetch_markup(&url).await?;
        let records = extract_raw_jobs(&html, &url, params.limit as usize)?;

        let fetched = records.len();
        let jobs = normalize_and_filter(records, JobSource::Naukri, &self.mappings, &self.filter);

        info!(fetched, relevant = jobs.len(), "Naukri fetch complete");
        Ok(jobs)
    }
}

#[async_trait]
impl BaseJobSource for NaukriSource {
    fn source(&self) -> JobSource {
        JobSource::Naukri
    }

    async fn fetch(&self, params: &QueryParameters) -> Result<Vec<Job>, SourceFetchError> {
        self.scrape(params)
            .await
            .map_err(|e| SourceFetchError::wrap(JobSource::Naukri, e))
    }
}
