//! The session loop: a single-owner state machine.
//!
//! ```text
//! Intro ──advance_to_active──▶ Active ──tick × total_days──▶ GameOver
//!   ▲                                                           │
//!   └────────────────────────── reset ◀─────────────────────────┘
//! ```
//!
//! `Session` owns the market state and the portfolio outright. Time only moves
//! when [`Session::tick`] is called, either by a test stepping virtual time or
//! by the real-time runner.

use std::fmt;
use std::time::Duration;

use hedge_models::models::{GbmStepper, DAYS_PER_YEAR};
use hedge_models::rng::HedgeRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::market::MarketState;
use crate::position::{Portfolio, PositionModel, PositionSnapshot};
use crate::scenario::{Difficulty, Scenario, ScenarioKind};
use crate::scoring::{HedgeQuality, SessionStats};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Scenario chosen, clock not started
    Intro,
    /// Clock running, trades accepted
    Active,
    /// Options expired, state frozen
    GameOver,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intro => "Intro",
            Self::Active => "Active",
            Self::GameOver => "GameOver",
        };
        f.write_str(name)
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Day reached by this tick
    pub day: u32,
    /// Price drawn for the day
    pub price: f64,
    /// Exposure carried into the tick
    pub scored_delta: f64,
    /// Hedge tier that exposure fell in
    pub quality: HedgeQuality,
    /// Cash credited (or debited when negative)
    pub reward: f64,
    /// Position after the price move and reward
    pub snapshot: PositionSnapshot,
    /// Present on the final tick
    pub game_over: Option<GameOverSummary>,
}

/// Final result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    /// Liquidation value at expiry
    pub final_value: f64,
    /// Best score before this session
    pub previous_best: Option<f64>,
    /// Whether this session beat the previous best
    pub is_new_best: bool,
}

impl GameOverSummary {
    fn new(final_value: f64, previous_best: Option<f64>) -> Self {
        let is_new_best = previous_best.map_or(true, |best| final_value > best);
        Self {
            final_value,
            previous_best,
            is_new_best,
        }
    }

    /// Best score after this session.
    pub fn best_score(&self) -> f64 {
        match self.previous_best {
            Some(best) if !self.is_new_best => best,
            _ => self.final_value,
        }
    }
}

/// Read-only view published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// Scenario display name
    pub scenario_name: String,
    /// Scenario description
    pub scenario_description: String,
    /// Scenario difficulty
    pub difficulty: Difficulty,
    /// Retained prices, oldest first
    pub price_path: Vec<f64>,
    /// Days simulated
    pub elapsed_days: u32,
    /// Days until expiry
    pub days_remaining: u32,
    /// Shares plus option delta
    pub net_delta: f64,
    /// Option gamma in shares
    pub net_gamma: f64,
    /// Mark-to-market equity
    pub liquidation_value: f64,
    /// Shares held
    pub shares_held: f64,
    /// Cash balance
    pub cash: f64,
    /// Scoring tally
    pub stats: SessionStats,
    /// Best score known to the session
    pub best_score: Option<f64>,
    /// Present once the session is over
    pub summary: Option<GameOverSummary>,
}

/// One delta-hedging session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    model: PositionModel,
    stepper: GbmStepper,
    rng: HedgeRng,
    scenario: Scenario,
    market: MarketState,
    portfolio: Portfolio,
    phase: SessionPhase,
    stats: SessionStats,
    best_score: Option<f64>,
    summary: Option<GameOverSummary>,
}

impl Session {
    /// Starts a session in the Intro phase with a randomly chosen scenario.
    ///
    /// Seeds from `config.seed` when set, otherwise from entropy.
    /// `best_score` is the persisted best, if any.
    pub fn new(config: SessionConfig, best_score: Option<f64>) -> Result<Self, SessionError> {
        let rng = match config.seed {
            Some(seed) => HedgeRng::from_seed(seed),
            None => HedgeRng::from_entropy(),
        };
        Self::with_rng(config, rng, best_score)
    }

    /// Starts a session with an explicit random source.
    pub fn with_rng(
        config: SessionConfig,
        mut rng: HedgeRng,
        best_score: Option<f64>,
    ) -> Result<Self, SessionError> {
        let kind = ScenarioKind::random(&mut rng);
        Self::build(config, kind, rng, best_score)
    }

    /// Starts a session on a chosen scenario.
    pub fn with_scenario(
        config: SessionConfig,
        kind: ScenarioKind,
        rng: HedgeRng,
        best_score: Option<f64>,
    ) -> Result<Self, SessionError> {
        Self::build(config, kind, rng, best_score)
    }

    fn build(
        config: SessionConfig,
        kind: ScenarioKind,
        rng: HedgeRng,
        best_score: Option<f64>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let model = PositionModel::new(config.rate, config.volatility)?;
        let stepper = GbmStepper::new(config.gbm_params()?, config.sampler);

        info!(
            scenario = kind.name(),
            seed = rng.seed(),
            sampler = config.sampler.name(),
            "Session created"
        );

        Ok(Self {
            scenario: kind.build(config.initial_price),
            market: MarketState::new(config.initial_price, config.price_window),
            portfolio: Portfolio::with_cash(config.initial_cash),
            phase: SessionPhase::Intro,
            stats: SessionStats::default(),
            summary: None,
            config,
            model,
            stepper,
            rng,
            best_score,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session parameters.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Scenario being hedged.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Market state.
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Player holdings.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Scoring tally.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Best score known to the session, including this one once finished.
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Raises the known best score to `score` if that is higher.
    ///
    /// Used to fold in a persisted best the caller did not have when the
    /// session was built. Takes effect at the next GameOver.
    pub fn record_best_score(&mut self, score: f64) {
        if score.is_finite() && self.best_score.map_or(true, |best| score > best) {
            self.best_score = Some(score);
        }
    }

    /// Final result, once the session is over.
    pub fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Seed of the session's random source.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Days left until expiry.
    pub fn days_remaining(&self) -> u32 {
        self.config
            .total_days
            .saturating_sub(self.market.elapsed_days())
    }

    /// Years left until expiry, never negative.
    pub fn time_to_expiry(&self) -> f64 {
        self.days_remaining() as f64 / DAYS_PER_YEAR
    }

    /// Fresh position snapshot at the latest price.
    pub fn snapshot(&self) -> PositionSnapshot {
        self.model.evaluate(
            &self.scenario,
            self.market.latest_price(),
            self.time_to_expiry(),
            &self.portfolio,
        )
    }

    /// Delay before the next tick at the current point in the session.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.market.elapsed_days())
    }

    /// Leaves the Intro phase and starts the clock.
    pub fn advance_to_active(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Intro {
            return Err(self.reject("start the clock"));
        }
        self.phase = SessionPhase::Active;
        info!(
            scenario = self.scenario.name(),
            total_days = self.config.total_days,
            "Session active"
        );
        Ok(())
    }

    /// Buys (`shares > 0`) or sells (`shares < 0`) the underlying at the
    /// latest price. Settles immediately in full.
    pub fn trade(&mut self, shares: f64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(self.reject("trade"));
        }
        if !shares.is_finite() {
            warn!(shares, "Rejected non-finite trade");
            return Err(SessionError::InvalidTrade { shares });
        }
        let price = self.market.latest_price();
        self.portfolio.trade(shares, price);
        debug!(
            shares,
            price,
            shares_held = self.portfolio.shares_held(),
            cash = self.portfolio.cash(),
            "Trade settled"
        );
        Ok(())
    }

    /// Advances the simulation by one day.
    ///
    /// Returns `None` outside the Active phase, so no tick ever fires after
    /// expiry. The reward is scored on the exposure carried into the tick,
    /// i.e. the snapshot at the previous price with the current holdings.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase != SessionPhase::Active {
            return None;
        }

        let scored_delta = self.snapshot().net_delta;

        let price = self.stepper.step(self.market.latest_price(), &mut self.rng);
        self.market.advance(price);

        let quality = HedgeQuality::classify(scored_delta.abs());
        let reward = quality.reward();
        self.portfolio.credit(reward);
        self.stats.record(quality, scored_delta.abs());

        let snapshot = self.snapshot();
        let day = self.market.elapsed_days();
        debug!(
            day,
            price,
            net_delta = snapshot.net_delta,
            liquidation_value = snapshot.liquidation_value,
            reward,
            "Tick"
        );

        let game_over = if day >= self.config.total_days {
            Some(self.finish(snapshot.liquidation_value))
        } else {
            None
        };

        Some(TickOutcome {
            day,
            price,
            scored_delta,
            quality,
            reward,
            snapshot,
            game_over,
        })
    }

    fn finish(&mut self, final_value: f64) -> GameOverSummary {
        let summary = GameOverSummary::new(final_value, self.best_score);
        self.phase = SessionPhase::GameOver;
        self.best_score = Some(summary.best_score());
        self.summary = Some(summary);

        info!(
            final_value,
            previous_best = ?summary.previous_best,
            new_best = summary.is_new_best,
            "Session over"
        );
        summary
    }

    /// Returns to Intro with a newly drawn scenario, a fresh price path, and
    /// a flat portfolio. The best score carries over.
    pub fn reset(&mut self) {
        let kind = ScenarioKind::random(&mut self.rng);
        self.scenario = kind.build(self.config.initial_price);
        self.market = MarketState::new(self.config.initial_price, self.config.price_window);
        self.portfolio = Portfolio::with_cash(self.config.initial_cash);
        self.phase = SessionPhase::Intro;
        self.stats = SessionStats::default();
        self.summary = None;
        info!(scenario = kind.name(), "Session reset");
    }

    /// Snapshot of everything the presentation layer displays.
    pub fn view(&self) -> SessionView {
        let snapshot = self.snapshot();
        SessionView {
            phase: self.phase,
            scenario_name: self.scenario.name().to_string(),
            scenario_description: self.scenario.description().to_string(),
            difficulty: self.scenario.difficulty(),
            price_path: self.market.price_path().collect(),
            elapsed_days: self.market.elapsed_days(),
            days_remaining: self.days_remaining(),
            net_delta: snapshot.net_delta,
            net_gamma: snapshot.net_gamma,
            liquidation_value: snapshot.liquidation_value,
            shares_held: self.portfolio.shares_held(),
            cash: self.portfolio.cash(),
            stats: self.stats,
            best_score: self.best_score,
            summary: self.summary,
        }
    }

    fn reject(&self, action: &'static str) -> SessionError {
        warn!(action, phase = %self.phase, "Action rejected");
        SessionError::InvalidPhase {
            action,
            phase: self.phase,
        }
    }
}
