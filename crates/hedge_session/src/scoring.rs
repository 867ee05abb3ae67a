//! Hedge-quality rewards and tick cadence.
//!
//! Every tick credits or debits cash according to how tightly the position
//! was hedged going into the tick:
//!
//! | Abs net delta   | Quality  | Cash    |
//! |-----------------|----------|---------|
//! | < 50            | Tight    | +150    |
//! | 50 ≤ x < 150    | Loose    | +50     |
//! | ≥ 150           | Unhedged | −50     |
//!
//! The cadence shortens linearly from the initial interval to the floor as
//! the session approaches expiry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of |net delta| for a tight hedge.
pub const TIGHT_BAND: f64 = 50.0;

/// Upper bound (exclusive) of |net delta| for a loose hedge.
pub const LOOSE_BAND: f64 = 150.0;

/// Cash credited for a tight hedge.
pub const TIGHT_REWARD: f64 = 150.0;

/// Cash credited for a loose hedge.
pub const LOOSE_REWARD: f64 = 50.0;

/// Cash debited when unhedged.
pub const UNHEDGED_PENALTY: f64 = -50.0;

/// Hedge quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeQuality {
    /// |net delta| below 50
    Tight,
    /// |net delta| in [50, 150)
    Loose,
    /// |net delta| of 150 or more
    Unhedged,
}

impl HedgeQuality {
    /// Classifies an absolute net delta.
    ///
    /// NaN exposure is treated as unhedged.
    pub fn classify(abs_net_delta: f64) -> Self {
        if abs_net_delta < TIGHT_BAND {
            Self::Tight
        } else if abs_net_delta < LOOSE_BAND {
            Self::Loose
        } else {
            Self::Unhedged
        }
    }

    /// Cash adjustment for this tier.
    pub fn reward(&self) -> f64 {
        match self {
            Self::Tight => TIGHT_REWARD,
            Self::Loose => LOOSE_REWARD,
            Self::Unhedged => UNHEDGED_PENALTY,
        }
    }
}

/// Cash adjustment for a tick entered with the given net delta.
///
/// # Examples
/// ```
/// use hedge_session::scoring::hedge_reward;
///
/// assert_eq!(hedge_reward(49.9), 150.0);
/// assert_eq!(hedge_reward(-50.0), 50.0);
/// assert_eq!(hedge_reward(150.0), -50.0);
/// ```
pub fn hedge_reward(net_delta: f64) -> f64 {
    HedgeQuality::classify(net_delta.abs()).reward()
}

/// Delay before the tick that follows `elapsed_days`.
///
/// Interpolates linearly from `initial` at day 0 to `floor` at `total_days`
/// and never drops below `floor`.
pub fn tick_interval(
    elapsed_days: u32,
    total_days: u32,
    initial: Duration,
    floor: Duration,
) -> Duration {
    if total_days == 0 || initial <= floor {
        return floor;
    }
    let progress = (elapsed_days as f64 / total_days as f64).clamp(0.0, 1.0);
    let span = (initial - floor).as_secs_f64();
    let interval = Duration::from_secs_f64(initial.as_secs_f64() - span * progress);
    interval.max(floor)
}

/// Running tally of a session's scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Ticks scored so far
    pub ticks: u32,
    /// Sum of rewards and penalties credited
    pub reward_total: f64,
    /// Ticks scored as tight hedges
    pub tight_ticks: u32,
    /// Ticks scored as unhedged
    pub unhedged_ticks: u32,
    /// Largest |net delta| carried into a tick
    pub worst_abs_delta: f64,
}

impl SessionStats {
    /// Records one scored tick.
    pub fn record(&mut self, quality: HedgeQuality, abs_net_delta: f64) {
        self.ticks += 1;
        self.reward_total += quality.reward();
        match quality {
            HedgeQuality::Tight => self.tight_ticks += 1,
            HedgeQuality::Unhedged => self.unhedged_ticks += 1,
            HedgeQuality::Loose => {}
        }
        self.worst_abs_delta = self.worst_abs_delta.max(abs_net_delta);
    }

    /// Fraction of scored ticks that were tight hedges.
    pub fn tight_ratio(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.tight_ticks as f64 / self.ticks as f64
        }
    }
}
