//! Play command implementation
//!
//! Plays one session to expiry with a scripted hedging strategy. By default
//! the session runs headlessly as fast as possible; `--realtime` drives it
//! through the session runner at the configured tick cadence, printing each
//! day as it happens.

use hedge_models::rng::HedgeRng;
use hedge_session::autopilot::{run_headless, HedgeStrategy};
use hedge_session::config::SessionConfig;
use hedge_session::runner::SessionRunner;
use hedge_session::scenario::ScenarioKind;
use hedge_session::score_store::BestScoreStore;
use hedge_session::scoring::SessionStats;
use hedge_session::session::{GameOverSummary, Session, SessionPhase, SessionView};
use serde::Serialize;
use tracing::{info, warn};

use super::OutputFormat;
use crate::{CliError, Result};

/// Options for one play-through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    /// Fixed scenario; drawn at random when absent
    pub scenario: Option<ScenarioKind>,
    /// Hedging strategy
    pub strategy: HedgeStrategy,
    /// Tick at the configured cadence instead of as fast as possible
    pub realtime: bool,
    /// Report format
    pub format: OutputFormat,
}

/// Outcome of a play-through
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayReport {
    /// Scenario played
    pub scenario: ScenarioKind,
    /// Strategy used
    pub strategy: HedgeStrategy,
    /// RNG seed, for replaying the same path
    pub seed: u64,
    /// Final result
    pub summary: GameOverSummary,
    /// Scoring tally
    pub stats: SessionStats,
    /// Shares held at expiry
    pub shares_held: f64,
    /// Cash at expiry
    pub cash: f64,
}

impl PlayReport {
    fn from_session(session: &Session, strategy: HedgeStrategy, summary: GameOverSummary) -> Self {
        Self {
            scenario: session.scenario().kind(),
            strategy,
            seed: session.seed(),
            summary,
            stats: *session.stats(),
            shares_held: session.portfolio().shares_held(),
            cash: session.portfolio().cash(),
        }
    }
}

/// Play one session, persisting a new best score through `store`
pub async fn play<S>(config: &SessionConfig, store: S, options: PlayOptions) -> Result<PlayReport>
where
    S: BestScoreStore + Send + 'static,
{
    let best = store.load()?;
    let session = new_session(config, options.scenario, best)?;
    info!(
        scenario = session.scenario().name(),
        strategy = options.strategy.name(),
        seed = session.seed(),
        realtime = options.realtime,
        "Starting play"
    );

    if options.realtime {
        play_realtime(session, store, options.strategy).await
    } else {
        play_headless(session, store, options.strategy)
    }
}

/// Run the play command
pub async fn run<S>(config: &SessionConfig, store: S, options: PlayOptions) -> Result<()>
where
    S: BestScoreStore + Send + 'static,
{
    let report = play(config, store, options).await?;

    match options.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render_table(&report)),
    }
    Ok(())
}

fn new_session(
    config: &SessionConfig,
    scenario: Option<ScenarioKind>,
    best: Option<f64>,
) -> Result<Session> {
    let session = match scenario {
        Some(kind) => {
            let rng = config.seed.map_or_else(HedgeRng::from_entropy, HedgeRng::from_seed);
            Session::with_scenario(config.clone(), kind, rng, best)?
        }
        None => Session::new(config.clone(), best)?,
    };
    Ok(session)
}

fn play_headless<S: BestScoreStore>(
    mut session: Session,
    mut store: S,
    strategy: HedgeStrategy,
) -> Result<PlayReport> {
    let summary = run_headless(&mut session, strategy)?;
    if summary.is_new_best {
        store.save(summary.final_value)?;
        info!(score = summary.final_value, "New best score saved");
    }
    Ok(PlayReport::from_session(&session, strategy, summary))
}

async fn play_realtime<S>(session: Session, store: S, strategy: HedgeStrategy) -> Result<PlayReport>
where
    S: BestScoreStore + Send + 'static,
{
    let (join, handle) = SessionRunner::spawn(session, store);
    let mut views = handle.views();
    handle.advance_to_active()?;

    let mut last_day = None;
    loop {
        tokio::select! {
            changed = views.changed() => {
                changed.map_err(|_| CliError::runtime("session runner stopped unexpectedly"))?;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, closing session");
                handle.close()?;
                join.await.map_err(|e| CliError::runtime(e.to_string()))?;
                return Err(CliError::runtime("session interrupted before expiry"));
            }
        }

        let view = views.borrow_and_update().clone();
        if view.phase == SessionPhase::GameOver {
            break;
        }
        if view.phase != SessionPhase::Active || last_day == Some(view.elapsed_days) {
            continue;
        }
        last_day = Some(view.elapsed_days);
        println!("{}", render_day(&view));

        if let Some(shares) = strategy.rebalance(view.net_delta) {
            handle.trade(shares)?;
        }
    }

    handle.close()?;
    let exit = join.await.map_err(|e| CliError::runtime(e.to_string()))?;
    let summary = exit
        .session
        .summary()
        .copied()
        .ok_or_else(|| CliError::runtime("session ended without a result"))?;
    Ok(PlayReport::from_session(&exit.session, strategy, summary))
}

fn render_day(view: &SessionView) -> String {
    let price = view.price_path.last().copied().unwrap_or(f64::NAN);
    format!(
        "Day {:>3} │ Price {:>9.2} │ Net Δ {:>9.2} │ Γ {:>8.2} │ Value {:>12.2}",
        view.elapsed_days, price, view.net_delta, view.net_gamma, view.liquidation_value
    )
}

fn render_table(report: &PlayReport) -> String {
    let best_line = match (report.summary.is_new_best, report.summary.previous_best) {
        (true, Some(previous)) => format!("NEW BEST (previous {:.2})", previous),
        (true, None) => "NEW BEST (first session)".to_string(),
        (false, Some(previous)) => format!("best remains {:.2}", previous),
        (false, None) => String::new(),
    };
    format!(
        "\n{} with {} (seed {})\n\
         ┌────────────────────┬──────────────┐\n\
         │ Final value        │ {:>12.2} │\n\
         │ Shares held        │ {:>12.0} │\n\
         │ Cash               │ {:>12.2} │\n\
         │ Hedge rewards      │ {:>12.2} │\n\
         │ Tight ticks        │ {:>6} / {:>3} │\n\
         │ Unhedged ticks     │ {:>12} │\n\
         │ Worst |net delta|  │ {:>12.2} │\n\
         └────────────────────┴──────────────┘\n\
         {}\n",
        report.scenario,
        report.strategy.name(),
        report.seed,
        report.summary.final_value,
        report.shares_held,
        report.cash,
        report.stats.reward_total,
        report.stats.tight_ticks,
        report.stats.ticks,
        report.stats.unhedged_ticks,
        report.stats.worst_abs_delta,
        best_line,
    )
}
