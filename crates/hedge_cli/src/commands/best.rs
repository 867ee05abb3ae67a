//! Best command implementation
//!
//! Shows, or clears, the stored best score.

use tracing::info;

use super::OutputFormat;
use crate::store::TomlScoreStore;
use crate::Result;

/// Run the best command
pub fn run(store: &mut TomlScoreStore, reset: bool, format: OutputFormat) -> Result<()> {
    if reset {
        if store.clear()? {
            info!(path = %store.path().display(), "Best score cleared");
            println!("Best score cleared.");
        } else {
            println!("No best score recorded.");
        }
        return Ok(());
    }

    let record = store.record()?;
    match (format, record) {
        (OutputFormat::Json, record) => println!("{}", serde_json::to_string_pretty(&record)?),
        (OutputFormat::Table, Some(record)) => println!(
            "Best score: {:.2} (set {})",
            record.best_score,
            record.recorded_at.format("%Y-%m-%d %H:%M UTC")
        ),
        (OutputFormat::Table, None) => println!("No best score recorded."),
    }
    Ok(())
}
