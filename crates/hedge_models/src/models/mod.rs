//! Stochastic models for the underlying price.
//!
//! Only Geometric Brownian Motion with flat rate and volatility is provided;
//! one step corresponds to one simulated day.

pub mod gbm;

pub use gbm::{next_price, GbmParams, GbmStepper, DAYS_PER_YEAR, ONE_DAY};
