// src/services/listing.rs

//! Listing page extractor.
//!
//! Walks the listing table row by row. Link, platform and rank are all
//! looked up inside the same row, so one malformed row cannot shift the
//! metadata of the rows after it.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DetailRequest, ListingSelectors, SiteConfig};
use crate::utils::html::{first_attr, first_own_text, first_text, parse_selector};
use crate::utils::resolve_url;
use crate::utils::text::{digit_runs, non_empty};

/// Detail requests found on one listing page plus the rows that failed.
#[derive(Debug, Default)]
pub struct ListingPage {
    pub requests: Vec<DetailRequest>,
    pub row_errors: Vec<AppError>,
}

/// Extracts detail requests from listing pages.
pub struct ListingExtractor {
    origin: Url,
    row: Selector,
    link: Selector,
    platform: Selector,
    rank: Selector,
    attr_name: String,
}

impl ListingExtractor {
    /// Create an extractor resolving links against the site origin.
    pub fn new(site: &SiteConfig, selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            origin: site.base()?,
            row: parse_selector(&selectors.row)?,
            link: parse_selector(&selectors.link)?,
            platform: parse_selector(&selectors.platform)?,
            rank: parse_selector(&selectors.rank)?,
            attr_name: selectors.attr_name.clone(),
        })
    }

    /// Extract one request per game row of `html`, fetched from `page_url`.
    ///
    /// Rows without a detail link are layout rows and are skipped silently.
    pub fn extract(&self, html: &str, page_url: &str) -> ListingPage {
        let document = Html::parse_document(html);
        let mut page = ListingPage::default();

        for row in document.select(&self.row) {
            let Some(href) = first_attr(row, &self.link, &self.attr_name) else {
                continue;
            };

            match self.parse_row(row, href, page_url) {
                Ok(request) => page.requests.push(request),
                Err(error) => page.row_errors.push(error),
            }
        }

        page
    }

    fn parse_row(&self, row: ElementRef<'_>, href: &str, page_url: &str) -> Result<DetailRequest> {
        let url = resolve_url(&self.origin, href.trim());

        let rank_text = first_own_text(row, &self.rank)
            .ok_or_else(|| AppError::listing(page_url, format!("no rank for {url}")))?;
        let rank = parse_rank(rank_text)
            .map_err(|message| AppError::listing(page_url, format!("{message} for {url}")))?;

        let platform = first_text(row, &self.platform)
            .and_then(non_empty)
            .ok_or_else(|| AppError::listing(page_url, format!("no platform for {url}")))?;

        Ok(DetailRequest::new(url, rank, platform))
    }
}

/// Parse a rank label such as `"12."`.
///
/// Exactly one run of digits is required; anything else is ambiguous.
pub fn parse_rank(text: &str) -> std::result::Result<u32, String> {
    match digit_runs(text).as_slice() {
        [digits] => digits
            .parse()
            .map_err(|e| format!("rank {text:?} out of range: {e}")),
        [] => Err(format!("rank {text:?} has no number")),
        _ => Err(format!("rank {text:?} has more than one number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str =
        "https://www.metacritic.com/browse/games/score/metascore/all/all/filtered?view=detailed&page=1";

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(&SiteConfig::default(), &ListingSelectors::default()).unwrap()
    }

    fn row(href: &str, platform: Option<&str>, rank: Option<&str>) -> String {
        let platform = platform
            .map(|p| {
                format!(
                    r#"<div class="platform"><span class="label">Platform:</span><span class="data">{p}</span></div>"#
                )
            })
            .unwrap_or_default();
        let rank = rank
            .map(|r| format!(r#"<span class="title numbered">{r}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<tr>
                <td class="clamp-image-wrap"><a href="{href}"><img src="x.jpg"></a></td>
                <td class="clamp-summary-wrap">
                    {platform}
                    <a href="{href}" class="title"><h3>Game</h3></a>
                    {rank}
                </td>
            </tr>
            <tr class="spacer"><td></td></tr>"#
        )
    }

    fn listing(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="clamp-list">{}</table></body></html>"#,
            rows.concat()
        )
    }

    #[test]
    fn pairs_each_row_with_its_own_metadata() {
        let html = listing(&[
            row("/game/a", Some("PC"), Some("1. ")),
            row("/game/b", Some("PS5"), Some("2. ")),
        ]);
        let page = extractor().extract(&html, PAGE_URL);

        assert!(page.row_errors.is_empty());
        assert_eq!(
            page.requests,
            vec![
                DetailRequest::new("https://www.metacritic.com/game/a", 1, "PC"),
                DetailRequest::new("https://www.metacritic.com/game/b", 2, "PS5"),
            ]
        );
    }

    #[test]
    fn platform_whitespace_is_trimmed() {
        let html = listing(&[row("/game/a", Some("\n   Switch\n  "), Some("\n 14.\n"))]);
        let page = extractor().extract(&html, PAGE_URL);
        assert_eq!(page.requests[0].context.platform, "Switch");
        assert_eq!(page.requests[0].context.rank, 14);
    }

    #[test]
    fn malformed_row_does_not_shift_later_rows() {
        let html = listing(&[
            row("/game/a", None, Some("1.")),
            row("/game/b", Some("PS5"), Some("2.")),
            row("/game/c", Some("PC"), Some("3.")),
        ]);
        let page = extractor().extract(&html, PAGE_URL);

        assert_eq!(page.row_errors.len(), 1);
        assert!(matches!(page.row_errors[0], AppError::Listing { .. }));
        assert_eq!(
            page.requests,
            vec![
                DetailRequest::new("https://www.metacritic.com/game/b", 2, "PS5"),
                DetailRequest::new("https://www.metacritic.com/game/c", 3, "PC"),
            ]
        );
    }

    #[test]
    fn ambiguous_rank_fails_only_that_row() {
        let html = listing(&[
            row("/game/a", Some("PC"), Some("1. 2.")),
            row("/game/b", Some("PC"), None),
            row("/game/c", Some("PC"), Some("3.")),
        ]);
        let page = extractor().extract(&html, PAGE_URL);

        assert_eq!(page.row_errors.len(), 2);
        assert_eq!(page.requests.len(), 1);
        assert_eq!(page.requests[0].context.rank, 3);
    }

    #[test]
    fn page_without_rows_yields_nothing() {
        let page = extractor().extract("<html><body></body></html>", PAGE_URL);
        assert!(page.requests.is_empty());
        assert!(page.row_errors.is_empty());
    }

    #[test]
    fn absolute_links_are_kept() {
        let html = listing(&[row("https://elsewhere.test/game/x", Some("PC"), Some("9."))]);
        let page = extractor().extract(&html, PAGE_URL);
        assert_eq!(page.requests[0].url, "https://elsewhere.test/game/x");
    }

    #[test]
    fn parse_rank_requires_exactly_one_number() {
        assert_eq!(parse_rank("1. "), Ok(1));
        assert_eq!(parse_rank("  100."), Ok(100));
        assert!(parse_rank("").is_err());
        assert!(parse_rank("#").is_err());
        assert!(parse_rank("1. 2.").is_err());
        assert!(parse_rank("99999999999.").is_err());
    }
}
