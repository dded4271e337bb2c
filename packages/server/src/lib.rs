// Tech Job Listing API - Core
//
// Aggregates software-engineering job listings from LinkedIn (structured
// search) and Naukri (HTML scraping) into one normalized shape, served over
// a small read-only HTTP API.

pub mod common;
pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
