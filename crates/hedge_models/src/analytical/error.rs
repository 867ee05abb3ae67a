//! Error types for analytical pricing.

use thiserror::Error;

/// Construction-time failures for analytical pricing inputs.
///
/// The free pricing functions treat these conditions as preconditions; the
/// validating constructors report them through this type instead.
///
/// # Examples
/// ```
/// use hedge_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(err.to_string().contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The rejected spot price
        spot: f64,
    },

    /// Non-positive strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Negative time to expiry.
    #[error("Invalid time to expiry: T = {expiry}")]
    InvalidExpiry {
        /// The rejected expiry in years
        expiry: f64,
    },

    /// Non-positive simulation time step.
    #[error("Invalid time step: dt = {dt}")]
    InvalidTimeStep {
        /// The rejected step in years
        dt: f64,
    },
}
