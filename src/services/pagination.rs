// src/services/pagination.rs

//! Pagination planner.
//!
//! Reads the last page index from listing page 0 and expands the listing
//! template into every page URL.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{PaginationSelectors, SiteConfig};
use crate::utils::html::{first_text, parse_selector};

/// Plans the listing pages of one crawl.
pub struct PaginationPlanner {
    site: SiteConfig,
    last_page: Selector,
}

impl PaginationPlanner {
    /// Create a planner for the given site and selectors.
    pub fn new(site: &SiteConfig, selectors: &PaginationSelectors) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            last_page: parse_selector(&selectors.last_page)?,
        })
    }

    /// URL of listing page 0, where the page count is read.
    pub fn first_page_url(&self) -> String {
        self.site.listing_url(0)
    }

    /// Read the last page index N from listing page 0.
    pub fn page_count(&self, html: &str) -> Result<usize> {
        let document = Html::parse_document(html);
        let text = first_text(document.root_element(), &self.last_page).ok_or_else(|| {
            AppError::discovery("page count element not found on first listing page")
        })?;

        let text = text.trim();
        text.parse::<usize>()
            .map_err(|e| AppError::discovery(format!("page count {text:?} is not a number: {e}")))
    }

    /// Listing URLs for pages `0..=N`, ascending.
    pub fn plan(&self, html: &str) -> Result<Vec<String>> {
        let last = self.page_count(html)?;
        Ok((0..=last).map(|page| self.site.listing_url(page)).collect())
    }
}
