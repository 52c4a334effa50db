// src/utils/report.rs

//! Run banners and summaries on top of the `log` facade.

use crate::models::CrawlStats;

const WIDTH: usize = 60;

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(WIDTH);
    log::info!("{}", border);
    log::info!("  {}", title);
    log::info!("{}", border);
}

/// Log a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    log::info!("[STEP {}/{}] {}", step_num, total, message);
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("    {}", message);
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {}", title);
    for (key, value) in items {
        log::info!("    {}: {}", key, value);
    }
}

/// Key/value lines describing a finished crawl.
pub fn stats_items(stats: &CrawlStats) -> Vec<(&'static str, String)> {
    vec![
        ("Listing pages", stats.listing_total.to_string()),
        ("Listing failures", stats.listing_failures.to_string()),
        ("Malformed rows", stats.row_failures.to_string()),
        ("Detail requests", stats.detail_total.to_string()),
        ("Detail failures", stats.detail_failures.to_string()),
        ("Duplicates skipped", stats.detail_duplicates.to_string()),
        ("Off-site skipped", stats.offsite_skipped.to_string()),
        ("Records written", stats.records_written.to_string()),
        (
            "Success rate",
            format!("{:.1}%", stats.success_rate() * 100.0),
        ),
        ("Elapsed", format!("{}s", stats.elapsed_secs())),
    ]
}

/// Log the summary of a finished crawl.
pub fn crawl_summary(stats: &CrawlStats) {
    summary("Crawl Results", &stats_items(stats));
}
