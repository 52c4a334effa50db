//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Plan listing pages, fetch them, then extract records
//! - `run_validate`: Check configuration and selectors

pub mod crawl;
pub mod validate;

pub use crawl::{Crawler, run_crawler};
pub use validate::run_validate;
