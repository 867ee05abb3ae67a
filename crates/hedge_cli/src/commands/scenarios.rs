//! Scenarios command implementation
//!
//! Lists the scenario catalog with the legs and opening exposure each entry
//! would have under the configured session parameters.

use hedge_models::models::DAYS_PER_YEAR;
use hedge_session::config::SessionConfig;
use hedge_session::position::{Portfolio, PositionModel};
use hedge_session::scenario::{Difficulty, ScenarioKind};
use serde::Serialize;

use super::OutputFormat;
use crate::Result;

/// Catalog entry as listed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioInfo {
    /// Catalog entry
    pub kind: ScenarioKind,
    /// Display name
    pub name: &'static str,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Description
    pub description: &'static str,
    /// Legs at the seed price, e.g. "Short 10 Call @ 100.00"
    pub legs: Vec<String>,
    /// Net delta before any hedge
    pub opening_delta: f64,
    /// Mark-to-market value before any hedge
    pub opening_value: f64,
}

/// Describe every catalog entry under `config`
pub fn catalog(config: &SessionConfig) -> Result<Vec<ScenarioInfo>> {
    config.validate()?;
    let model = PositionModel::new(config.rate, config.volatility)?;
    let expiry = config.total_days as f64 / DAYS_PER_YEAR;
    let portfolio = Portfolio::with_cash(config.initial_cash);

    Ok(ScenarioKind::ALL
        .iter()
        .map(|&kind| {
            let scenario = kind.build(config.initial_price);
            let snapshot = model.evaluate(&scenario, config.initial_price, expiry, &portfolio);
            ScenarioInfo {
                kind,
                name: kind.name(),
                difficulty: kind.difficulty(),
                description: kind.description(),
                legs: scenario.legs().iter().map(ToString::to_string).collect(),
                opening_delta: snapshot.net_delta,
                opening_value: snapshot.liquidation_value,
            }
        })
        .collect())
}

/// Run the scenarios command
pub fn run(config: &SessionConfig, format: OutputFormat) -> Result<()> {
    let entries = catalog(config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => {
            for entry in &entries {
                println!(
                    "\n{} [{}]\n  {}",
                    entry.name,
                    entry.difficulty.label(),
                    entry.description
                );
                for leg in &entry.legs {
                    println!("  - {}", leg);
                }
                println!(
                    "  Opening net delta: {:>10.2}   Opening value: {:>12.2}",
                    entry.opening_delta, entry.opening_value
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_scenario() {
        let entries = catalog(&SessionConfig::default()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Short Straddle");
        assert_eq!(entries[0].legs.len(), 2);
    }

    #[test]
    fn test_naked_call_opens_short_delta() {
        let entries = catalog(&SessionConfig::default()).unwrap();
        let naked = entries
            .iter()
            .find(|e| e.kind == ScenarioKind::NakedCall)
            .unwrap();
        assert!(naked.opening_delta < -500.0);
        assert!(naked.opening_value < 0.0);
    }

    #[test]
    fn test_catalog_rejects_invalid_config() {
        let mut config = SessionConfig::default();
        config.volatility = 0.0;
        assert!(catalog(&config).is_err());
    }
}
