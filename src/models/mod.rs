// src/models/mod.rs

//! Domain models for the crawler.
//!
//! Configuration, selectors, the extracted record and the request context
//! threaded between pipeline stages.

mod config;
mod record;
mod request;
mod selectors;
mod stats;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, PAGE_PLACEHOLDER, SiteConfig};
pub use record::{GameRecord, Sentiment};
pub use request::{DetailRequest, RequestContext};
pub use selectors::{DetailSelectors, ListingSelectors, PaginationSelectors, Selectors};
pub use stats::CrawlStats;
