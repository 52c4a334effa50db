//! Crawl run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Listing pages scheduled by the planner
    pub listing_total: usize,
    pub listing_failures: usize,
    /// Listing rows that could not be turned into a request
    pub row_failures: usize,

    /// Detail requests produced by the listing stage
    pub detail_total: usize,
    pub detail_failures: usize,
    /// Detail requests skipped because the URL was already requested
    pub detail_duplicates: usize,
    /// Requests refused by the host allow-list
    pub offsite_skipped: usize,

    pub records_written: usize,
}

impl CrawlStats {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            listing_total: 0,
            listing_failures: 0,
            row_failures: 0,
            detail_total: 0,
            detail_failures: 0,
            detail_duplicates: 0,
            offsite_skipped: 0,
            records_written: 0,
        }
    }

    /// Fraction of fetched detail pages that produced a record.
    pub fn success_rate(&self) -> f64 {
        let attempted = self
            .detail_total
            .saturating_sub(self.detail_duplicates + self.offsite_skipped);
        if attempted == 0 {
            return 1.0;
        }
        self.records_written as f64 / attempted as f64
    }

    /// Run duration in whole seconds.
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_ignores_skipped_requests() {
        let mut stats = CrawlStats::new(Utc::now());
        stats.detail_total = 10;
        stats.detail_duplicates = 2;
        stats.offsite_skipped = 3;
        stats.records_written = 4;
        assert!((stats.success_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn success_rate_of_empty_run_is_one() {
        let stats = CrawlStats::new(Utc::now());
        assert_eq!(stats.success_rate(), 1.0);
    }
}
