//! Scenario catalog.
//!
//! A scenario is a fixed set of option legs the player is short and must
//! hedge. The catalog is a closed enumeration; strikes are derived from the
//! session's seed price so every scenario starts near the money.

use std::fmt;

use hedge_models::analytical::{AnalyticalError, OptionKind};
use hedge_models::rng::HedgeRng;
use serde::{Deserialize, Serialize};

/// Underlying units per option contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Strike offset of out-of-the-money legs as a fraction of the seed price.
pub const STRANGLE_WIDTH: f64 = 0.10;

/// Contracts written per leg.
const CONTRACTS_PER_LEG: i32 = 10;

/// One option position: kind, strike, and signed contract count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Call or put
    pub kind: OptionKind,
    /// Strike price
    pub strike: f64,
    /// Signed number of contracts; negative is short
    pub quantity: i32,
}

impl OptionLeg {
    /// Creates a leg, rejecting non-positive strikes.
    pub fn new(kind: OptionKind, strike: f64, quantity: i32) -> Result<Self, AnalyticalError> {
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        Ok(Self {
            kind,
            strike,
            quantity,
        })
    }

    /// Underlying units controlled by the leg, signed.
    #[inline]
    pub fn units(&self) -> f64 {
        self.quantity as f64 * CONTRACT_MULTIPLIER
    }

    /// Returns true for written options.
    pub fn is_short(&self) -> bool {
        self.quantity < 0
    }
}

impl fmt::Display for OptionLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_short() { "Short" } else { "Long" };
        write!(
            f,
            "{} {} {} @ {:.2}",
            side,
            self.quantity.abs(),
            self.kind.name(),
            self.strike
        )
    }
}

/// Display difficulty of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Small initial exposure, gentle gamma
    Easy,
    /// Large directional exposure from the start
    Medium,
    /// Highest gamma near expiry
    Hard,
}

impl Difficulty {
    /// Label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// The fixed scenario catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Short at-the-money call and put
    Straddle,
    /// Short out-of-the-money call and put
    Strangle,
    /// Short at-the-money call, no offsetting put
    NakedCall,
}

impl ScenarioKind {
    /// Every scenario, in catalog order
    pub const ALL: [ScenarioKind; 3] = [Self::Straddle, Self::Strangle, Self::NakedCall];

    /// Uniformly random catalog entry
    pub fn random(rng: &mut HedgeRng) -> Self {
        Self::ALL[rng.gen_index(Self::ALL.len())]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Straddle => "Short Straddle",
            Self::Strangle => "Short Strangle",
            Self::NakedCall => "Naked Call",
        }
    }

    /// One-line description shown before the session starts
    pub fn description(&self) -> &'static str {
        match self {
            Self::Straddle => {
                "You sold at-the-money calls and puts. Delta starts near flat but swings hard as expiry nears."
            }
            Self::Strangle => {
                "You sold out-of-the-money calls and puts. Quiet until the price runs toward a strike."
            }
            Self::NakedCall => {
                "You sold at-the-money calls with no protection. Start short delta and stay ahead of rallies."
            }
        }
    }

    /// Display difficulty
    pub fn difficulty(&self) -> Difficulty {
        match self {
            Self::Straddle => Difficulty::Hard,
            Self::Strangle => Difficulty::Easy,
            Self::NakedCall => Difficulty::Medium,
        }
    }

    /// Builds the scenario around `base_price`.
    ///
    /// `base_price` must be positive; every strike is a positive multiple of it.
    pub fn build(self, base_price: f64) -> Scenario {
        debug_assert!(base_price > 0.0, "base price must be positive");
        let short = -CONTRACTS_PER_LEG;
        let leg = |kind, strike| OptionLeg {
            kind,
            strike,
            quantity: short,
        };
        let legs = match self {
            Self::Straddle => vec![
                leg(OptionKind::Call, base_price),
                leg(OptionKind::Put, base_price),
            ],
            Self::Strangle => vec![
                leg(OptionKind::Call, base_price * (1.0 + STRANGLE_WIDTH)),
                leg(OptionKind::Put, base_price * (1.0 - STRANGLE_WIDTH)),
            ],
            Self::NakedCall => vec![leg(OptionKind::Call, base_price)],
        };
        Scenario { kind: self, legs }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A catalog entry instantiated at a seed price. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    kind: ScenarioKind,
    legs: Vec<OptionLeg>,
}

impl Scenario {
    /// Scenario with hand-picked legs; `kind` only supplies the labels.
    #[cfg(test)]
    pub(crate) fn custom(kind: ScenarioKind, legs: Vec<OptionLeg>) -> Self {
        Self { kind, legs }
    }

    /// Catalog entry
    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Description
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// Difficulty
    pub fn difficulty(&self) -> Difficulty {
        self.kind.difficulty()
    }

    /// Option legs
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }
}
