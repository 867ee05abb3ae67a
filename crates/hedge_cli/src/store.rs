//! TOML-file best-score store.
//!
//! Holds a single record; every save overwrites the file (last write wins).
//!
//! ```toml
//! best_score = 12450.75
//! recorded_at = "2026-10-19T09:30:00Z"
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hedge_session::error::ScoreStoreError;
use hedge_session::score_store::BestScoreStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted best score with the time it was set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Best liquidation value
    pub best_score: f64,
    /// When the score was saved
    pub recorded_at: DateTime<Utc>,
}

/// Best-score store backed by a TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlScoreStore {
    path: PathBuf,
}

impl TomlScoreStore {
    /// Store at `path`; the file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing the store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full stored record, or `None` if nothing has been saved.
    pub fn record(&self) -> Result<Option<ScoreRecord>, ScoreStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let record = toml::from_str(&content).map_err(|e| ScoreStoreError::parse(e.to_string()))?;
        Ok(Some(record))
    }

    /// Deletes the stored score. Returns true if a file was removed.
    pub fn clear(&mut self) -> Result<bool, ScoreStoreError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }
}

impl BestScoreStore for TomlScoreStore {
    fn load(&self) -> Result<Option<f64>, ScoreStoreError> {
        Ok(self.record()?.map(|r| r.best_score))
    }

    fn save(&mut self, score: f64) -> Result<(), ScoreStoreError> {
        if !score.is_finite() {
            return Err(ScoreStoreError::serialise(format!(
                "score must be finite, got {}",
                score
            )));
        }
        let record = ScoreRecord {
            best_score: score,
            recorded_at: Utc::now(),
        };
        let content =
            toml::to_string(&record).map_err(|e| ScoreStoreError::serialise(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), score, "Best score written");
        Ok(())
    }
}
