//! Best-score persistence.
//!
//! The session itself only holds the best score in memory. Stores are the
//! seam to whatever durable medium the host chooses; the runner loads the
//! score at construction time and saves it whenever a session ends with a
//! new best.

use crate::error::ScoreStoreError;

/// Durable storage for the best liquidation value seen so far.
pub trait BestScoreStore {
    /// Loads the stored best score, or `None` if nothing has been saved.
    fn load(&self) -> Result<Option<f64>, ScoreStoreError>;

    /// Replaces the stored best score.
    fn save(&mut self, score: f64) -> Result<(), ScoreStoreError>;
}

/// Volatile store; holds the score for the life of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InMemoryScoreStore {
    best: Option<f64>,
}

impl InMemoryScoreStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a best score
    pub fn with_best(score: f64) -> Self {
        Self { best: Some(score) }
    }
}

impl BestScoreStore for InMemoryScoreStore {
    fn load(&self) -> Result<Option<f64>, ScoreStoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: f64) -> Result<(), ScoreStoreError> {
        if !score.is_finite() {
            return Err(ScoreStoreError::serialise(format!(
                "score must be finite, got {}",
                score
            )));
        }
        self.best = Some(score);
        Ok(())
    }
}
