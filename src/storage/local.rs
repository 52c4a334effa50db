//! Local filesystem sink.
//!
//! Appends records to a JSON Lines file and writes run statistics
//! atomically (temp file, then rename) when the crawl finishes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{AppError, Result};
use crate::models::{CrawlStats, GameRecord, OutputConfig};
use crate::storage::RecordSink;

/// JSON Lines sink backed by a local file.
pub struct JsonLinesSink {
    records_path: PathBuf,
    stats_path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl JsonLinesSink {
    /// Create (or truncate) the records file under the configured directory.
    pub async fn create(output: &OutputConfig) -> Result<Self> {
        Self::with_paths(output.records_path(), output.stats_path()).await
    }

    /// Create a sink writing to explicit paths.
    pub async fn with_paths(
        records_path: impl Into<PathBuf>,
        stats_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let records_path = records_path.into();
        ensure_dir_for(&records_path).await?;
        let file = File::create(&records_path).await?;

        Ok(Self {
            records_path,
            stats_path: stats_path.into(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Path of the records file.
    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[async_trait]
impl RecordSink for JsonLinesSink {
    async fn write(&mut self, record: GameRecord) -> Result<()> {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.written += 1;
        Ok(())
    }

    async fn finish(&mut self, stats: &CrawlStats) -> Result<()> {
        self.writer.flush().await?;
        let bytes = serde_json::to_vec_pretty(stats)?;
        write_atomic(&self.stats_path, &bytes).await
    }
}

/// Load statistics persisted by a previous run, if any.
pub async fn load_stats(path: impl AsRef<Path>) -> Result<Option<CrawlStats>> {
    match fs::read(path.as_ref()).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Ensure parent directory exists.
async fn ensure_dir_for(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Write bytes atomically (write to temp, then rename).
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_dir_for(path).await?;

    let tmp = path.with_extension("tmp");
    let mut file = File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(rank: u32, title: &str) -> GameRecord {
        GameRecord {
            id: GameRecord::identity_key(Some(title), "PC"),
            url: format!("https://www.metacritic.com/game/pc/{rank}"),
            rank,
            title: Some(title.to_string()),
            platform: "PC".to_string(),
            critic_score_pos: Some("90".to_string()),
            critic_score_mix: None,
            critic_score_neg: None,
            critic_consensus: "Universal acclaim".to_string(),
            num_critic_reviews: 10,
            user_score_pos: None,
            user_score_mix: None,
            user_score_neg: None,
            user_consensus: None,
            num_user_reviews: 0,
            game_summary: None,
            game_summary_long: None,
            release_date: None,
            developer: None,
            genres: Vec::new(),
            num_players: None,
            esrb_rating: None,
        }
    }

    #[tokio::test]
    async fn writes_one_json_object_per_line() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("nested").to_string_lossy().into_owned(),
            ..OutputConfig::default()
        };

        let mut sink = JsonLinesSink::create(&output).await.unwrap();
        sink.write(record(1, "A")).await.unwrap();
        sink.write(record(2, "B")).await.unwrap();

        let mut stats = CrawlStats::new(Utc::now());
        stats.records_written = sink.written();
        sink.finish(&stats).await.unwrap();

        let content = std::fs::read_to_string(output.records_path()).unwrap();
        let lines: Vec<GameRecord> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines, vec![record(1, "A"), record(2, "B")]);

        let loaded = load_stats(output.stats_path()).await.unwrap().unwrap();
        assert_eq!(loaded.records_written, 2);
        assert!(!output.stats_path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn create_truncates_previous_run() {
        let dir = TempDir::new().unwrap();
        let records = dir.path().join("records.jsonl");
        let stats = dir.path().join("stats.json");

        let mut first = JsonLinesSink::with_paths(&records, &stats).await.unwrap();
        first.write(record(1, "A")).await.unwrap();
        first.finish(&CrawlStats::new(Utc::now())).await.unwrap();

        let mut second = JsonLinesSink::with_paths(&records, &stats).await.unwrap();
        second.finish(&CrawlStats::new(Utc::now())).await.unwrap();

        assert_eq!(std::fs::read_to_string(&records).unwrap(), "");
    }

    #[tokio::test]
    async fn load_stats_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_stats(dir.path().join("stats.json")).await.unwrap();
        assert!(loaded.is_none());
    }
}
