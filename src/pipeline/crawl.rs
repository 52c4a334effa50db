// src/pipeline/crawl.rs

//! Crawl pipeline: plan listing pages, collect detail requests, emit records.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlStats, DetailRequest};
use crate::services::{DetailExtractor, ListingExtractor, PaginationPlanner};
use crate::storage::RecordSink;
use crate::utils::get_domain;
use crate::utils::http::{HttpFetcher, PageFetcher};
use crate::utils::report;

/// Dispatches requests for one crawl and hands records to a sink.
pub struct Crawler<F: PageFetcher> {
    config: Arc<Config>,
    fetcher: F,
    planner: PaginationPlanner,
    listing: ListingExtractor,
    detail: DetailExtractor,
}

impl<F: PageFetcher> Crawler<F> {
    /// Compile all selectors and bind the fetcher.
    pub fn new(config: Arc<Config>, fetcher: F) -> Result<Self> {
        let planner = PaginationPlanner::new(&config.site, &config.selectors.pagination)?;
        let listing = ListingExtractor::new(&config.site, &config.selectors.listing)?;
        let detail = DetailExtractor::new(&config.selectors.detail)?;

        Ok(Self {
            config,
            fetcher,
            planner,
            listing,
            detail,
        })
    }

    /// Run the whole crawl.
    ///
    /// Only a failure to discover the page count (or a sink failure) is
    /// returned as an error; every other failure is counted in the stats.
    pub async fn run(&self, sink: &mut dyn RecordSink) -> Result<CrawlStats> {
        let mut stats = CrawlStats::new(Utc::now());

        report::step(1, 3, "Discovering listing pages");
        let pages = self.plan_pages().await?;
        stats.listing_total = pages.len();
        log::info!("Planned {} listing pages", pages.len());

        report::step(2, 3, "Collecting detail requests");
        let requests = self.collect_requests(pages, &mut stats).await;
        log::info!("Queued {} detail pages", requests.len());

        report::step(3, 3, "Extracting records");
        self.emit_records(requests, sink, &mut stats).await?;

        stats.end_time = Utc::now();
        sink.finish(&stats).await?;
        Ok(stats)
    }

    async fn plan_pages(&self) -> Result<Vec<String>> {
        let first = self.planner.first_page_url();
        let body = self.fetch_allowed(&first).await?;
        let mut pages = self.planner.plan(&body)?;

        if let Some(max) = self.config.crawler.max_pages {
            if pages.len() > max {
                log::info!("Limiting crawl to {} of {} listing pages", max, pages.len());
                pages.truncate(max);
            }
        }
        Ok(pages)
    }

    /// Stage 1: fetch listing pages concurrently and gather detail requests.
    async fn collect_requests(
        &self,
        pages: Vec<String>,
        stats: &mut CrawlStats,
    ) -> Vec<DetailRequest> {
        let delay = self.delay();
        let mut seen = HashSet::new();
        let mut requests = Vec::new();

        let mut listing_stream = stream::iter(pages)
            .map(|url| async move {
                let result = self
                    .fetch_allowed(&url)
                    .await
                    .map(|body| self.listing.extract(&body, &url));
                (url, result)
            })
            .buffer_unordered(self.concurrency());

        while let Some((url, result)) = listing_stream.next().await {
            match result {
                Ok(page) => {
                    for error in page.row_errors {
                        stats.row_failures += 1;
                        log::warn!("Skipping listing row: {}", error);
                    }

                    for request in page.requests {
                        stats.detail_total += 1;
                        if let Err(error) = self.ensure_allowed(&request.url) {
                            stats.offsite_skipped += 1;
                            log::debug!("{}", error);
                        } else if seen.insert(request.url.clone()) {
                            requests.push(request);
                        } else {
                            stats.detail_duplicates += 1;
                            log::debug!("Already queued: {}", request.url);
                        }
                    }
                }
                Err(error) => {
                    stats.listing_failures += 1;
                    log::warn!("Failed to fetch listing page {}: {}", url, error);
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        requests
    }

    /// Stage 2: fetch detail pages concurrently and write each record.
    async fn emit_records(
        &self,
        requests: Vec<DetailRequest>,
        sink: &mut dyn RecordSink,
        stats: &mut CrawlStats,
    ) -> Result<()> {
        let delay = self.delay();

        let mut detail_stream = stream::iter(requests)
            .map(|DetailRequest { url, context }| async move {
                let result = match self.fetch_allowed(&url).await {
                    Ok(body) => self.detail.extract(&body, &url, context),
                    Err(error) => Err(error),
                };
                (url, result)
            })
            .buffer_unordered(self.concurrency());

        while let Some((url, result)) = detail_stream.next().await {
            match result {
                Ok(record) => {
                    sink.write(record).await?;
                    stats.records_written += 1;
                }
                Err(error) => {
                    stats.detail_failures += 1;
                    log::warn!("Dropping record for {}: {}", url, error);
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(())
    }

    /// Fetch `url` only if its host is allowed.
    async fn fetch_allowed(&self, url: &str) -> Result<String> {
        self.ensure_allowed(url)?;
        self.fetcher.fetch(url).await
    }

    fn ensure_allowed(&self, url: &str) -> Result<()> {
        match get_domain(url) {
            Some(host) if self.config.site.is_allowed_host(&host) => Ok(()),
            _ => Err(AppError::OffSite {
                url: url.to_string(),
            }),
        }
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.config.crawler.request_delay_ms)
    }

    fn concurrency(&self) -> usize {
        self.config.crawler.max_concurrent.max(1)
    }
}

/// Run the crawler over HTTP and write records to `sink`.
pub async fn run_crawler(config: Arc<Config>, sink: &mut dyn RecordSink) -> Result<CrawlStats> {
    report::header("Game review crawler starting");
    log::info!("Site: {}", config.site.base_url);

    let fetcher = HttpFetcher::new(&config.crawler)?;
    let crawler = Crawler::new(Arc::clone(&config), fetcher)?;
    let stats = crawler.run(sink).await?;

    report::crawl_summary(&stats);
    Ok(stats)
}
