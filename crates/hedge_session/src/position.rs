//! Position model: aggregates option legs and the share hedge into one net
//! exposure and one mark-to-market value.
//!
//! The snapshot is a pure projection of the scenario, the latest price, the
//! time to expiry, and the portfolio. It is recomputed from those primitives
//! every time it is needed and never patched incrementally.

use hedge_models::analytical::{AnalyticalError, BlackScholes};
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// The player's share position and cash.
///
/// Only two operations change it: settling a trade and crediting the per-tick
/// hedge reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    shares_held: f64,
    cash: f64,
}

impl Portfolio {
    /// Creates a portfolio with the given holdings.
    pub fn new(shares_held: f64, cash: f64) -> Self {
        Self { shares_held, cash }
    }

    /// Flat portfolio holding only cash.
    pub fn with_cash(cash: f64) -> Self {
        Self::new(0.0, cash)
    }

    /// Underlying shares held; negative is short.
    pub fn shares_held(&self) -> f64 {
        self.shares_held
    }

    /// Cash balance.
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Buys (`shares > 0`) or sells (`shares < 0`) at `price`, settling cash
    /// immediately.
    ///
    /// # Examples
    /// ```
    /// use hedge_session::position::Portfolio;
    ///
    /// let mut portfolio = Portfolio::default();
    /// portfolio.trade(50.0, 100.0);
    /// assert_eq!(portfolio.shares_held(), 50.0);
    /// assert_eq!(portfolio.cash(), -5000.0);
    /// ```
    pub fn trade(&mut self, shares: f64, price: f64) {
        self.shares_held += shares;
        self.cash -= shares * price;
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.cash += amount;
    }
}

/// Derived exposure and value at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Shares plus option delta, in shares
    pub net_delta: f64,
    /// Option gamma in shares per unit move
    pub net_gamma: f64,
    /// Aggregate delta of the option legs alone
    pub option_delta: f64,
    /// Aggregate signed value of the option legs; negative for written options
    pub option_value: f64,
    /// Cash plus shares marked at the price plus option value
    pub liquidation_value: f64,
}

/// Evaluates scenarios under flat rate and volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionModel {
    rate: f64,
    volatility: f64,
}

impl PositionModel {
    /// Creates a model, rejecting non-positive volatility.
    pub fn new(rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self { rate, volatility })
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Projects the scenario and portfolio at `market_price` with
    /// `time_to_expiry` years left.
    ///
    /// Each leg contributes its unit delta, gamma, and price scaled by
    /// `100 × quantity`, so written legs enter with negative sign.
    ///
    /// `market_price` must be positive and `time_to_expiry` non-negative.
    pub fn evaluate(
        &self,
        scenario: &Scenario,
        market_price: f64,
        time_to_expiry: f64,
        portfolio: &Portfolio,
    ) -> PositionSnapshot {
        debug_assert!(market_price > 0.0, "market price must be positive");
        debug_assert!(time_to_expiry >= 0.0, "time to expiry must be non-negative");

        let model = BlackScholes::new_unchecked(market_price, self.rate, self.volatility);

        let (option_delta, option_gamma, option_value) = scenario.legs().iter().fold(
            (0.0, 0.0, 0.0),
            |(delta, gamma, value), leg| {
                let units = leg.units();
                (
                    delta + units * model.delta(leg.kind, leg.strike, time_to_expiry),
                    gamma + units * model.gamma(leg.strike, time_to_expiry),
                    value + units * model.price(leg.kind, leg.strike, time_to_expiry),
                )
            },
        );

        let shares = portfolio.shares_held();
        PositionSnapshot {
            net_delta: shares + option_delta,
            net_gamma: option_gamma,
            option_delta,
            option_value,
            liquidation_value: portfolio.cash() + shares * market_price + option_value,
        }
    }
}
