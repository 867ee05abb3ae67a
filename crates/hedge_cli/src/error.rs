//! Error types for the hedge CLI.

use hedge_models::analytical::AnalyticalError;
use hedge_session::error::{ScoreStoreError, SessionError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid pricing inputs
    #[error("{0}")]
    Model(#[from] AnalyticalError),

    /// Session error
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Best-score store error
    #[error("Score store error: {0}")]
    Store(#[from] ScoreStoreError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be rendered
    #[error("Output error: {0}")]
    Output(String),

    /// Background task failed
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Create a runtime error
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::output(err.to_string())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
