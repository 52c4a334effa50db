//! In-memory sink, for embedding the crawler and for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CrawlStats, GameRecord};
use crate::storage::RecordSink;

/// Collects records and the final statistics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<GameRecord>,
    pub stats: Option<CrawlStats>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn write(&mut self, record: GameRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    async fn finish(&mut self, stats: &CrawlStats) -> Result<()> {
        self.stats = Some(stats.clone());
        Ok(())
    }
}
