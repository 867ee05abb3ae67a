//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod best;
pub mod play;
pub mod price;
pub mod scenarios;

use clap::ValueEnum;

/// Output format shared by the reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}
