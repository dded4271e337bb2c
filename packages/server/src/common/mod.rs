// Common types shared across the kernel and the HTTP layer

pub mod job;
pub mod query;

pub use job::{Job, JobSource, RawRecord, SENTINEL};
pub use query::{JobQuery, QueryParameters, DEFAULT_KEYWORD, DEFAULT_LIMIT};
