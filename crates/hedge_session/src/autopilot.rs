//! Scripted hedging strategies for headless sessions.
//!
//! Used by the CLI's non-interactive mode, by benchmarks, and as a baseline
//! when comparing scenarios.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SessionError;
use crate::position::PositionSnapshot;
use crate::session::{GameOverSummary, Session, SessionPhase};

/// Rule deciding the trade to place before each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum HedgeStrategy {
    /// Never trade
    Idle,
    /// Flatten net delta every tick
    DeltaNeutral,
    /// Flatten net delta once its magnitude exceeds `threshold`
    Band {
        /// Exposure that triggers a rehedge
        threshold: f64,
    },
}

impl HedgeStrategy {
    /// Whole-share order for the given exposure, if any.
    pub fn order(&self, snapshot: &PositionSnapshot) -> Option<f64> {
        self.rebalance(snapshot.net_delta)
    }

    /// Whole-share order for a bare net delta, if any.
    pub fn rebalance(&self, exposure: f64) -> Option<f64> {
        let rehedge = match self {
            Self::Idle => false,
            Self::DeltaNeutral => true,
            Self::Band { threshold } => exposure.abs() > *threshold,
        };
        let shares = (-exposure).round();
        (rehedge && shares != 0.0 && shares.is_finite()).then_some(shares)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DeltaNeutral => "delta_neutral",
            Self::Band { .. } => "band",
        }
    }
}

/// Plays a session to expiry without waiting between ticks.
///
/// Starts the clock if the session is still in Intro. Fails if the session
/// has already finished.
pub fn run_headless(
    session: &mut Session,
    strategy: HedgeStrategy,
) -> Result<GameOverSummary, SessionError> {
    if session.phase() == SessionPhase::Intro {
        session.advance_to_active()?;
    }

    loop {
        if let Some(shares) = strategy.order(&session.snapshot()) {
            session.trade(shares)?;
        }
        let outcome = session.tick().ok_or(SessionError::InvalidPhase {
            action: "tick",
            phase: session.phase(),
        })?;
        if let Some(summary) = outcome.game_over {
            debug!(
                strategy = strategy.name(),
                final_value = summary.final_value,
                "Headless session finished"
            );
            return Ok(summary);
        }
    }
}
