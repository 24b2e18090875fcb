//! JSONL Wager Store - Append-only Wager and Fixture Files
//!
//! Persists wagers to `wagers.jsonl` and fixtures to `matches.jsonl`
//! inside a data directory. Each line is a self-contained JSON record,
//! so files can be appended to by other tools and streamed for analysis.
//! Session aggregates are derived from the wager file on demand.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use crate::domain::session::{SessionAggregate, sessions_by_day};
use crate::domain::wager::{CategoryId, MatchOdds, WagerRecord};
use crate::ports::wager_store::WagerStore;

const WAGERS_FILE: &str = "wagers.jsonl";
const MATCHES_FILE: &str = "matches.jsonl";

/// File-backed implementation of the `WagerStore` port.
pub struct JsonlWagerStore {
    /// Path to wagers.jsonl.
    wagers_path: PathBuf,
    /// Path to matches.jsonl.
    matches_path: PathBuf,
}

impl JsonlWagerStore {
    /// Create a store in the given data directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            wagers_path: dir.join(WAGERS_FILE),
            matches_path: dir.join(MATCHES_FILE),
        })
    }

    /// Append a wager record.
    #[instrument(skip(self, wager), fields(wager_id = %wager.id))]
    pub async fn append_wager(&self, wager: &WagerRecord) -> Result<()> {
        append_line(&self.wagers_path, wager).await
    }

    /// Append a fixture with its odds.
    #[instrument(skip(self, fixture), fields(match_id = %fixture.match_id))]
    pub async fn append_match(&self, fixture: &MatchOdds) -> Result<()> {
        append_line(&self.matches_path, fixture).await
    }

    /// Every wager on file, oldest first.
    pub async fn load_all_wagers(&self) -> Result<Vec<WagerRecord>> {
        let mut wagers: Vec<WagerRecord> = read_lines(&self.wagers_path).await?;
        wagers.sort_by_key(|w| w.placed_at);
        Ok(wagers)
    }

    /// Every fixture on file, by kick-off.
    pub async fn load_all_matches(&self) -> Result<Vec<MatchOdds>> {
        let mut matches: Vec<MatchOdds> = read_lines(&self.matches_path).await?;
        matches.sort_by_key(|m| m.kickoff);
        Ok(matches)
    }
}

#[async_trait]
impl WagerStore for JsonlWagerStore {
    async fn load_wagers(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WagerRecord>> {
        Ok(self
            .load_all_wagers()
            .await?
            .into_iter()
            .filter(|w| w.placed_at >= from && w.placed_at < to)
            .collect())
    }

    async fn load_sessions(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<BTreeMap<CategoryId, Vec<SessionAggregate>>> {
        let wagers = self.load_wagers(from, to).await?;
        Ok(sessions_by_day(&wagers))
    }

    async fn load_upcoming_matches(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<MatchOdds>> {
        Ok(self
            .load_all_matches()
            .await?
            .into_iter()
            .filter(|m| m.kickoff >= from && m.kickoff < to)
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        match self.wagers_path.parent() {
            Some(dir) => fs::metadata(dir).await.is_ok_and(|m| m.is_dir()),
            None => false,
        }
    }
}

async fn append_line<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let mut json = serde_json::to_string(record).context("Failed to serialize record")?;
    json.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(json.as_bytes())
        .await
        .context("Failed to write record")?;
    file.flush().await.context("Failed to flush record")?;

    Ok(())
}

/// Reads a JSONL file, skipping blank and malformed lines.
/// A missing file reads as empty.
async fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(file = %path.display(), "No data file yet");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    file = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "Skipping malformed record"
                );
            }
        }
    }

    debug!(file = %path.display(), count = records.len(), "Loaded records");
    Ok(records)
}
