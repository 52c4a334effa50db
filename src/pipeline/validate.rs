// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::services::{DetailExtractor, ListingExtractor, PaginationPlanner};
use crate::utils::report;

/// Validate configuration values and compile every selector.
pub fn run_validate(config: &Config) -> Result<()> {
    report::header("Validating configuration");

    if let Err(e) = check(config) {
        log::error!("Validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    report::sub_item(&format!("User agent: {}", config.crawler.user_agent));
    report::sub_item(&format!("Timeout: {}s", config.crawler.timeout_secs));
    report::sub_item(&format!("Max concurrent: {}", config.crawler.max_concurrent));
    report::sub_item(&format!("First listing page: {}", config.site.listing_url(0)));
    report::sub_item(&format!(
        "Allowed domains: {}",
        config.site.allowed_domains.join(", ")
    ));
    log::info!("✓ Selectors OK");
    Ok(())
}

fn check(config: &Config) -> Result<()> {
    config.validate()?;
    PaginationPlanner::new(&config.site, &config.selectors.pagination)?;
    ListingExtractor::new(&config.site, &config.selectors.listing)?;
    DetailExtractor::new(&config.selectors.detail)?;
    Ok(())
}
