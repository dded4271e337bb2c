//! Source adapters, one per external provider.

pub mod linkedin;
pub mod naukri;

pub use linkedin::LinkedInSource;
pub use naukri::NaukriSource;

use crate::common::{Job, JobSource, RawRecord};
use crate::kernel::normalizer::FieldMappings;
use crate::kernel::relevance::RelevanceFilter;

/// Normalize each record, then keep only tech-relevant jobs (order preserved).
pub(crate) fn normalize_and_filter<I>(
    records: I,
    source: JobSource,
    mappings: &FieldMappings,
    filter: &RelevanceFilter,
) -> Vec<Job>
where
    I: IntoIterator<Item = RawRecord>,
{
    records
        .into_iter()
        .map(|raw| mappings.to_job(&raw, source))
        .filter(|job| filter.is_tech_relevant(job))
        .collect()
}
