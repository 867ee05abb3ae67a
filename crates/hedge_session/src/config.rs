//! Session parameters.
//!
//! Rate and volatility are flat and fixed for the life of a session. All
//! fields have defaults so a partial TOML table deserialises cleanly.

use std::time::Duration;

use hedge_models::models::GbmParams;
use hedge_models::rng::NormalSampler;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::scoring::tick_interval;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated days until the options expire
    pub total_days: u32,

    /// Risk-free rate (annualised)
    pub rate: f64,

    /// Flat volatility (annualised)
    pub volatility: f64,

    /// Seed price of the underlying; scenario strikes are derived from it
    pub initial_price: f64,

    /// Number of recent prices retained for display
    pub price_window: usize,

    /// Starting cash balance
    pub initial_cash: f64,

    /// Milliseconds between ticks at the start of the session
    pub initial_tick_ms: u64,

    /// Milliseconds between ticks as expiry approaches
    pub min_tick_ms: u64,

    /// Shock sampler for the price path
    pub sampler: NormalSampler,

    /// Fixed RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_days: 60,
            rate: 0.05,
            volatility: 0.30,
            initial_price: 100.0,
            price_window: 60,
            initial_cash: 0.0,
            initial_tick_ms: 1000,
            min_tick_ms: 500,
            sampler: NormalSampler::Gaussian,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the session length
    pub fn with_total_days(mut self, total_days: u32) -> Self {
        self.total_days = total_days;
        self
    }

    /// Set the shock sampler
    pub fn with_sampler(mut self, sampler: NormalSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Validate the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), SessionError> {
        let mut errors = Vec::new();

        if !(self.volatility > 0.0 && self.volatility.is_finite()) {
            errors.push(format!("volatility must be positive, got {}", self.volatility));
        }
        if !(self.rate > 0.0 && self.rate.is_finite()) {
            errors.push(format!("rate must be positive, got {}", self.rate));
        }
        if self.total_days == 0 {
            errors.push("total_days must be greater than 0".to_string());
        }
        if !(self.initial_price > 0.0 && self.initial_price.is_finite()) {
            errors.push(format!(
                "initial_price must be positive, got {}",
                self.initial_price
            ));
        }
        if self.price_window == 0 {
            errors.push("price_window must be greater than 0".to_string());
        }
        if !self.initial_cash.is_finite() {
            errors.push(format!("initial_cash must be finite, got {}", self.initial_cash));
        }
        if self.min_tick_ms == 0 {
            errors.push("min_tick_ms must be greater than 0".to_string());
        }
        if self.min_tick_ms > self.initial_tick_ms {
            errors.push(format!(
                "min_tick_ms {} exceeds initial_tick_ms {}",
                self.min_tick_ms, self.initial_tick_ms
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SessionError::InvalidConfig(errors))
        }
    }

    /// Daily GBM parameters for the price path
    pub fn gbm_params(&self) -> Result<GbmParams, SessionError> {
        Ok(GbmParams::daily(self.rate, self.volatility)?)
    }

    /// Delay before the tick that follows `elapsed_days`
    pub fn tick_interval(&self, elapsed_days: u32) -> Duration {
        tick_interval(
            elapsed_days,
            self.total_days,
            Duration::from_millis(self.initial_tick_ms),
            Duration::from_millis(self.min_tick_ms),
        )
    }
}
