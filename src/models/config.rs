//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Selectors;

/// Placeholder substituted with the page index in `SiteConfig::listing_path`.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Target site and crawl boundary
    #[serde(default)]
    pub site: SiteConfig,

    /// CSS selectors for listing and detail pages
    #[serde(default)]
    pub selectors: Selectors,

    /// Where records and run statistics are written
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.max_pages == Some(0) {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        if !self.site.listing_path.contains(PAGE_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "site.listing_path must contain {PAGE_PLACEHOLDER}"
            )));
        }
        if self.site.allowed_domains.is_empty() {
            return Err(AppError::validation("site.allowed_domains is empty"));
        }

        let base = self.site.base()?;
        let host = base
            .host_str()
            .ok_or_else(|| AppError::validation("site.base_url has no host"))?;
        if !self.site.is_allowed_host(host) {
            return Err(AppError::validation(format!(
                "site.base_url host {host} is not in site.allowed_domains"
            )));
        }

        if self.output.records_file.trim().is_empty() {
            return Err(AppError::validation("output.records_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay after each completed request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Retries after the first failed attempt
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Backoff unit between retries, multiplied by the attempt number
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,

    /// Optional cap on the number of listing pages to visit
    #[serde(default)]
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            max_retries: defaults::max_retries(),
            retry_backoff_ms: defaults::retry_backoff(),
            max_pages: None,
        }
    }
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site origin, e.g. `https://www.metacritic.com`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Listing path template containing `{page}`
    #[serde(default = "defaults::listing_path")]
    pub listing_path: String,

    /// Hosts the dispatcher is allowed to request
    #[serde(default = "defaults::allowed_domains")]
    pub allowed_domains: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            listing_path: defaults::listing_path(),
            allowed_domains: defaults::allowed_domains(),
        }
    }
}

impl SiteConfig {
    /// Parsed site origin.
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Listing URL for a page index.
    pub fn listing_url(&self, page: usize) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.listing_path
                .replace(PAGE_PLACEHOLDER, &page.to_string())
        )
    }

    /// Whether `host` is one of the allowed domains (case-insensitive).
    pub fn is_allowed_host(&self, host: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(host))
    }
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// JSON Lines file for records, relative to `dir`
    #[serde(default = "defaults::records_file")]
    pub records_file: String,

    /// JSON file for run statistics, relative to `dir`
    #[serde(default = "defaults::stats_file")]
    pub stats_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            records_file: defaults::records_file(),
            stats_file: defaults::stats_file(),
        }
    }
}

impl OutputConfig {
    pub fn records_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.records_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.stats_file)
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; review-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        250
    }
    pub fn max_concurrent() -> usize {
        8
    }
    pub fn max_retries() -> u32 {
        2
    }
    pub fn retry_backoff() -> u64 {
        1000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://www.metacritic.com".into()
    }
    pub fn listing_path() -> String {
        "/browse/games/score/metascore/all/all/filtered?view=detailed&page={page}".into()
    }
    pub fn allowed_domains() -> Vec<String> {
        vec!["www.metacritic.com".into()]
    }

    // Output defaults
    pub fn output_dir() -> String {
        "storage/output".into()
    }
    pub fn records_file() -> String {
        "records.jsonl".into()
    }
    pub fn stats_file() -> String {
        "stats.json".into()
    }
}
