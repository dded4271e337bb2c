//! Schema normalization: raw source records into canonical [`Job`]s.
//!
//! Field names differ per source, so each source gets a [`SourceFieldMap`]
//! naming the raw key that feeds every canonical field. Values are copied
//! verbatim; a key that is absent, `null`, or empty becomes [`SENTINEL`].

use serde::Serialize;
use serde_json::Value;

use crate::common::{Job, JobSource, RawRecord, SENTINEL};

/// Raw key for each canonical field of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFieldMap {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub posted_date: String,
    pub experience_level: String,
    pub job_type: String,
}

impl SourceFieldMap {
    /// Mapping for the structured LinkedIn provider.
    pub fn linkedin() -> Self {
        Self {
            id: "jobId".into(),
            title: "title".into(),
            company: "company".into(),
            location: "location".into(),
            description: "description".into(),
            link: "link".into(),
            posted_date: "postedDate".into(),
            experience_level: "experienceLevel".into(),
            job_type: "jobType".into(),
        }
    }

    /// Mapping for records assembled from Naukri result blocks.
    pub fn naukri() -> Self {
        Self {
            id: "id".into(),
            experience_level: "experience".into(),
            ..Self::linkedin()
        }
    }
}

/// Per-source field mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappings {
    pub linkedin: SourceFieldMap,
    pub naukri: SourceFieldMap,
}

impl Default for FieldMappings {
    fn default() -> Self {
        Self {
            linkedin: SourceFieldMap::linkedin(),
            naukri: SourceFieldMap::naukri(),
        }
    }
}

/// Outcome of normalizing a record under a free-form source tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Job(Job),
    /// Unrecognized tag: the record passes through untouched.
    Raw(RawRecord),
}

impl FieldMappings {
    pub fn for_source(&self, source: JobSource) -> &SourceFieldMap {
        match source {
            JobSource::LinkedIn => &self.linkedin,
            JobSource::Naukri => &self.naukri,
        }
    }

    /// Normalize under a string tag. Unknown tags return the record as-is.
    pub fn normalize(&self, raw: RawRecord, source_tag: &str) -> Normalized {
        match JobSource::from_tag(source_tag) {
            Some(source) => Normalized::Job(self.to_job(&raw, source)),
            None => Normalized::Raw(raw),
        }
    }

    /// Map a raw record of a known source onto the canonical schema.
    pub fn to_job(&self, raw: &RawRecord, source: JobSource) -> Job {
        let map = self.for_source(source);
        let field = |key: &str| field_or_sentinel(raw, key);

        Job {
            id: field(&map.id),
            title: field(&map.title),
            company: field(&map.company),
            location: field(&map.location),
            description: field(&map.description),
            link: field(&map.link),
            posted_date: field(&map.posted_date),
            source,
            experience_level: field(&map.experience_level),
            job_type: field(&map.job_type),
        }
    }
}

fn field_or_sentinel(raw: &RawRecord, key: &str) -> String {
    let value = match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };
    value.unwrap_or_else(|| SENTINEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_complete_linkedin_record_maps_verbatim() {
        let raw = record(json!({
            "jobId": "3901",
            "title": "  Senior Rust Engineer",
            "company": "Acme Corp",
            "location": "Bengaluru, Karnataka, India",
            "description": "Build APIs",
            "link": "https://www.linkedin.com/jobs/view/3901",
            "postedDate": "2024-05-01",
            "experienceLevel": "Mid-Senior level",
            "jobType": "Full-time"
        }));

        let job = FieldMappings::default().to_job(&raw, JobSource::LinkedIn);

        assert_eq!(job.id, "3901");
        assert_eq!(job.title, "  Senior Rust Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.location, "Bengaluru, Karnataka, India");
        assert_eq!(job.description, "Build APIs");
        assert_eq!(job.link, "https://www.linkedin.com/jobs/view/3901");
        assert_eq!(job.posted_date, "2024-05-01");
        assert_eq!(job.experience_level, "Mid-Senior level");
        assert_eq!(job.job_type, "Full-time");
        assert_eq!(job.source, JobSource::LinkedIn);
    }

    #[test]
    fn test_missing_null_and_empty_fields_become_sentinel() {
        let raw = record(json!({
            "title": "Backend Developer",
            "company": null,
            "location": "",
            "experience": "2-5 Yrs"
        }));

        let job = FieldMappings::default().to_job(&raw, JobSource::Naukri);

        assert_eq!(job.title, "Backend Developer");
        assert_eq!(job.experience_level, "2-5 Yrs");
        for value in [
            &job.id,
            &job.company,
            &job.location,
            &job.description,
            &job.link,
            &job.posted_date,
            &job.job_type,
        ] {
            assert_eq!(value, SENTINEL);
        }
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let raw = record(json!({"jobId": 3901, "title": "SRE"}));
        let job = FieldMappings::default().to_job(&raw, JobSource::LinkedIn);
        assert_eq!(job.id, "3901");
    }

    #[test]
    fn test_structured_values_are_treated_as_missing() {
        let raw = record(json!({"company": {"name": "Acme"}, "location": ["Pune"]}));
        let job = FieldMappings::default().to_job(&raw, JobSource::LinkedIn);
        assert_eq!(job.company, SENTINEL);
        assert_eq!(job.location, SENTINEL);
    }

    #[test]
    fn test_unrecognized_tag_returns_record_unchanged() {
        let raw = record(json!({"position": "Engineer", "extra": 1}));
        let normalized = FieldMappings::default().normalize(raw.clone(), "indeed");
        assert_eq!(normalized, Normalized::Raw(raw));
    }

    #[test]
    fn test_tag_dispatch_is_case_insensitive() {
        let raw = record(json!({"title": "Data Engineer"}));
        match FieldMappings::default().normalize(raw, "LinkedIn") {
            Normalized::Job(job) => assert_eq!(job.source, JobSource::LinkedIn),
            Normalized::Raw(_) => panic!("expected a canonical job"),
        }
    }

    #[test]
    fn test_custom_mapping_table() {
        let mut mappings = FieldMappings::default();
        mappings.linkedin.company = "companyName".into();

        let raw = record(json!({"companyName": "Initech"}));
        let job = mappings.to_job(&raw, JobSource::LinkedIn);
        assert_eq!(job.company, "Initech");
    }
}
