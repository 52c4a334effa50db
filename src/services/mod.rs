//! Extraction services.
//!
//! - Page count discovery and listing URL planning (`PaginationPlanner`)
//! - Listing rows to detail requests (`ListingExtractor`)
//! - Detail pages to records (`DetailExtractor`)

mod detail;
mod listing;
mod pagination;

pub use detail::DetailExtractor;
pub use listing::{ListingExtractor, ListingPage, parse_rank};
pub use pagination::PaginationPlanner;
