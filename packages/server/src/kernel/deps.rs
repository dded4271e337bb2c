//! Wiring of the production source adapters.
//!
//! Adapters only see trait objects, so tests build an [`Aggregator`] from
//! mocks instead of going through here.

use anyhow::Result;
use apify_client::ApifyClient;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::kernel::{
    Aggregator, ApifyJobSearchProvider, BaseJobSearchProvider, FieldMappings, HttpMarkupFetcher,
    LinkedInSource, NaukriSource, RelevanceFilter, UnconfiguredSearchProvider,
};

/// Register every source in combined-fetch dispatch order (LinkedIn, then Naukri).
pub fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let mappings = Arc::new(FieldMappings::default());

    let filter = Arc::new(match &config.tech_keywords {
        Some(keywords) => {
            info!(count = keywords.len(), "Using configured tech keywords");
            RelevanceFilter::new(keywords)
        }
        None => RelevanceFilter::default(),
    });

    let provider: Arc<dyn BaseJobSearchProvider> = match &config.apify_api_token {
        Some(token) => {
            info!(actor = %config.apify_linkedin_actor, "LinkedIn search via Apify enabled");
            Arc::new(ApifyJobSearchProvider::new(
                ApifyClient::new(token.clone())?.with_max_polls(config.apify_max_polls),
                config.apify_linkedin_actor.clone(),
            ))
        }
        None => {
            warn!("APIFY_API_TOKEN not set; LinkedIn requests will fail");
            Arc::new(UnconfiguredSearchProvider)
        }
    };

    let fetcher = Arc::new(HttpMarkupFetcher::new(config.source_timeout)?);

    let linkedin = LinkedInSource::new(provider, mappings.clone(), filter.clone())
        .with_default_location(config.linkedin_default_location.clone());
    let naukri = NaukriSource::new(fetcher, mappings, filter)
        .with_base_url(config.naukri_base_url.clone());

    Ok(Aggregator::new()
        .with_source(Arc::new(linkedin))
        .with_source(Arc::new(naukri)))
}
