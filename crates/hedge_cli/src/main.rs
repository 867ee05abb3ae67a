//! Hedge CLI - Delta-Hedging Simulator
//!
//! Command-line entry point for the delta-hedging simulator.
//!
//! # Commands
//!
//! - `hedge play` - Play one session with a scripted hedging strategy
//! - `hedge price --kind call --spot 100 --strike 100 --days 30` - Quote one leg
//! - `hedge scenarios` - List the scenario catalog
//! - `hedge best` - Show (or clear) the stored best score
//!
//! # Architecture
//!
//! As the **S**ervice layer on top of `hedge_models` and `hedge_session`, this
//! crate owns configuration loading, logging initialisation, and best-score
//! persistence.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hedge_models::analytical::OptionKind;
use hedge_session::autopilot::HedgeStrategy;
use hedge_session::scenario::ScenarioKind;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod store;

use commands::OutputFormat;
use config::{HedgeConfig, DEFAULT_CONFIG_FILE};
pub use error::{CliError, Result};
use store::TomlScoreStore;

/// Delta-hedging simulator CLI
#[derive(Parser)]
#[command(name = "hedge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one session to expiry with a scripted hedging strategy
    Play {
        /// Scenario to play; random when omitted
        #[arg(short, long, value_enum)]
        scenario: Option<ScenarioArg>,

        /// Hedging strategy
        #[arg(short = 't', long, value_enum, default_value = "delta-neutral")]
        strategy: StrategyArg,

        /// Rehedge threshold in shares for the band strategy
        #[arg(long, default_value = "50")]
        band: f64,

        /// RNG seed (overrides the configuration)
        #[arg(long)]
        seed: Option<u64>,

        /// Tick at the configured cadence instead of as fast as possible
        #[arg(long)]
        realtime: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Quote price, delta, and gamma of one option leg
    Price {
        /// Option kind
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Underlying price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Calendar days to expiry
        #[arg(short, long)]
        days: f64,

        /// Risk-free rate (defaults to the session rate)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Volatility (defaults to the session volatility)
        #[arg(long)]
        vol: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the scenario catalog
    Scenarios {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the stored best score
    Best {
        /// Delete the stored best score
        #[arg(long)]
        reset: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Straddle,
    Strangle,
    NakedCall,
}

impl From<ScenarioArg> for ScenarioKind {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Straddle => Self::Straddle,
            ScenarioArg::Strangle => Self::Strangle,
            ScenarioArg::NakedCall => Self::NakedCall,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Idle,
    DeltaNeutral,
    Band,
}

impl StrategyArg {
    fn into_strategy(self, band: f64) -> HedgeStrategy {
        match self {
            Self::Idle => HedgeStrategy::Idle,
            Self::DeltaNeutral => HedgeStrategy::DeltaNeutral,
            Self::Band => HedgeStrategy::Band { threshold: band },
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Call,
    Put,
}

impl From<KindArg> for OptionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Call => Self::Call,
            KindArg::Put => Self::Put,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = HedgeConfig::load_with_env_and_validate(&cli.config)?;

    // Initialise tracing; RUST_LOG takes precedence over the configured level
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Play {
            scenario,
            strategy,
            band,
            seed,
            realtime,
            format,
        } => {
            if matches!(strategy, StrategyArg::Band) && !(band > 0.0) {
                return Err(CliError::invalid_argument("--band must be positive").into());
            }
            let mut session_config = config.session.clone();
            if seed.is_some() {
                session_config.seed = seed;
            }
            let options = commands::play::PlayOptions {
                scenario: scenario.map(Into::into),
                strategy: strategy.into_strategy(band),
                realtime,
                format,
            };
            let store = TomlScoreStore::new(&config.score_file);
            commands::play::run(&session_config, store, options).await?;
        }
        Commands::Price {
            kind,
            spot,
            strike,
            days,
            rate,
            vol,
            format,
        } => {
            let request = commands::price::PriceRequest {
                kind: kind.into(),
                spot,
                strike,
                days,
                rate: rate.unwrap_or(config.session.rate),
                volatility: vol.unwrap_or(config.session.volatility),
            };
            commands::price::run(&request, format)?;
        }
        Commands::Scenarios { format } => commands::scenarios::run(&config.session, format)?,
        Commands::Best { reset, format } => {
            let mut store = TomlScoreStore::new(&config.score_file);
            commands::best::run(&mut store, reset, format)?;
        }
    }

    info!("Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play() {
        let cli = Cli::try_parse_from([
            "hedge", "play", "--scenario", "naked-call", "--strategy", "band", "--band", "80",
            "--seed", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Play {
                scenario,
                strategy,
                band,
                seed,
                realtime,
                ..
            } => {
                assert_eq!(scenario.map(ScenarioKind::from), Some(ScenarioKind::NakedCall));
                assert_eq!(
                    strategy.into_strategy(band),
                    HedgeStrategy::Band { threshold: 80.0 }
                );
                assert_eq!(seed, Some(5));
                assert!(!realtime);
            }
            _ => panic!("Expected play command"),
        }
    }

    #[test]
    fn test_parse_price_with_global_config() {
        let cli = Cli::try_parse_from([
            "hedge", "price", "--kind", "put", "--spot", "95", "--strike", "100", "--days", "30",
            "--config", "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::Price { kind: KindArg::Put, .. }));
    }
}
