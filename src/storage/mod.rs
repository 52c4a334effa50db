//! Output sinks for extracted records.
//!
//! Records are handed to a sink one at a time as soon as they are
//! extracted; nothing is kept in memory by the pipeline afterwards.
//!
//! ## Local Layout
//!
//! ```text
//! {output.dir}/
//! ├── records.jsonl         # One GameRecord per line
//! └── stats.json            # CrawlStats of the last run
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CrawlStats, GameRecord};

// Re-export for convenience
pub use local::JsonLinesSink;
pub use memory::MemorySink;

/// Destination for records produced by the pipeline.
#[async_trait]
pub trait RecordSink: Send {
    /// Accept one record.
    async fn write(&mut self, record: GameRecord) -> Result<()>;

    /// Flush pending output and persist the run statistics.
    async fn finish(&mut self, stats: &CrawlStats) -> Result<()>;
}
