//! Error types for the session layer.

use hedge_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::session::SessionPhase;

/// Session error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// Invalid model parameters
    #[error("Invalid model parameters: {0}")]
    Model(#[from] AnalyticalError),

    /// Configuration failed validation
    #[error("Invalid session configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Action not permitted in the current phase
    #[error("Cannot {action} during the {phase} phase")]
    InvalidPhase {
        /// Rejected action
        action: &'static str,
        /// Phase the session was in
        phase: SessionPhase,
    },

    /// Non-finite trade size
    #[error("Invalid trade size: {shares}")]
    InvalidTrade {
        /// Rejected share count
        shares: f64,
    },

    /// The runner task has stopped and no longer accepts commands
    #[error("Session runner has stopped")]
    RunnerStopped,
}

/// Best-score persistence error type.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    /// IO error reading or writing the store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Score could not be serialised
    #[error("Serialisation error: {0}")]
    Serialise(String),
}

impl ScoreStoreError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a serialisation error
    pub fn serialise(msg: impl Into<String>) -> Self {
        Self::Serialise(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_phase_display() {
        let err = SessionError::InvalidPhase {
            action: "trade",
            phase: SessionPhase::Intro,
        };
        assert_eq!(err.to_string(), "Cannot trade during the Intro phase");
    }

    #[test]
    fn test_invalid_config_joins_errors() {
        let err = SessionError::InvalidConfig(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid session configuration: a; b");
    }

    #[test]
    fn test_model_error_conversion() {
        let err: SessionError = AnalyticalError::InvalidVolatility { volatility: 0.0 }.into();
        assert!(err.to_string().contains("volatility"));
    }

    #[test]
    fn test_score_store_error_display() {
        assert!(ScoreStoreError::parse("bad float").to_string().contains("bad float"));
    }
}
