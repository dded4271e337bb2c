//! Kernel module - aggregation pipeline and its infrastructure.

pub mod aggregator;
pub mod apify_provider;
pub mod deps;
pub mod errors;
pub mod markup_fetcher;
pub mod normalizer;
pub mod relevance;
pub mod sources;
pub mod test_dependencies;
pub mod traits;

pub use aggregator::{AggregatedJobs, Aggregator, SourceError, SourceResult};
pub use apify_provider::{ApifyJobSearchProvider, UnconfiguredSearchProvider};
pub use deps::build_aggregator;
pub use errors::{AggregationFault, SourceFetchError};
pub use markup_fetcher::HttpMarkupFetcher;
pub use normalizer::{FieldMappings, Normalized, SourceFieldMap};
pub use relevance::RelevanceFilter;
pub use sources::{LinkedInSource, NaukriSource};
pub use traits::*;
