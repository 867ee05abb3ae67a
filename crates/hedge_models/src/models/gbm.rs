//! Geometric Brownian Motion price steps.
//!
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//!
//! Each step uses the log-space exact solution:
//! ```text
//! S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//! Prices stay strictly positive for any finite shock.

use num_traits::Float;

use crate::analytical::distributions::constant;
use crate::analytical::AnalyticalError;
use crate::rng::{HedgeRng, NormalSampler};

/// Days per year used for the simulation clock.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Length of one simulated day in years.
pub const ONE_DAY: f64 = 1.0 / DAYS_PER_YEAR;

/// One GBM step from `current_price` given a unit shock `z`.
///
/// # Examples
/// ```
/// use hedge_models::models::next_price;
///
/// // With no shock the price grows by the Itô-corrected drift only
/// let p = next_price(100.0_f64, 1.0 / 365.0, 0.05, 0.30, 0.0);
/// let expected = 100.0 * ((0.05 - 0.045) / 365.0_f64).exp();
/// assert!((p - expected).abs() < 1e-12);
/// ```
#[inline]
pub fn next_price<T: Float>(current_price: T, dt: T, rate: T, volatility: T, z: T) -> T {
    let half = constant::<T>(0.5);
    let drift = (rate - half * volatility * volatility) * dt;
    let diffusion = volatility * dt.sqrt() * z;
    current_price * (drift + diffusion).exp()
}

/// GBM parameters for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Risk-free drift (annualised)
    pub rate: f64,
    /// Volatility (annualised)
    pub volatility: f64,
    /// Step length in years
    pub dt: f64,
}

impl GbmParams {
    /// Creates daily-step parameters.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidVolatility` if volatility <= 0.
    pub fn daily(rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        Self::new(rate, volatility, ONE_DAY)
    }

    /// Creates parameters with an explicit step.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::InvalidTimeStep` if dt <= 0
    pub fn new(rate: f64, volatility: f64, dt: f64) -> Result<Self, AnalyticalError> {
        if !(volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !(dt > 0.0) {
            return Err(AnalyticalError::InvalidTimeStep { dt });
        }
        Ok(Self {
            rate,
            volatility,
            dt,
        })
    }

    /// Expected log return of one step: (r − σ²/2)·dt.
    pub fn log_drift(&self) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * self.dt
    }

    /// Variance of the log return of one step under a unit-variance shock: σ²·dt.
    pub fn log_variance(&self) -> f64 {
        self.volatility * self.volatility * self.dt
    }
}

/// Stateless GBM stepper.
///
/// Holds no price: the caller threads the latest price through each call, so a
/// path can be restarted from any price at any time.
#[derive(Clone, Copy, Debug)]
pub struct GbmStepper {
    params: GbmParams,
    sampler: NormalSampler,
}

impl GbmStepper {
    /// Creates a stepper.
    pub fn new(params: GbmParams, sampler: NormalSampler) -> Self {
        Self { params, sampler }
    }

    /// Returns the parameters.
    pub fn params(&self) -> &GbmParams {
        &self.params
    }

    /// Returns the shock sampler.
    pub fn sampler(&self) -> NormalSampler {
        self.sampler
    }

    /// Draws a fresh shock and advances `current_price` by one step.
    #[inline]
    pub fn step(&self, current_price: f64, rng: &mut HedgeRng) -> f64 {
        let z = self.sampler.draw(rng);
        next_price(
            current_price,
            self.params.dt,
            self.params.rate,
            self.params.volatility,
            z,
        )
    }

    /// Lazy, unbounded sequence of prices following `start`.
    ///
    /// # Examples
    /// ```
    /// use hedge_models::models::{GbmParams, GbmStepper};
    /// use hedge_models::rng::{HedgeRng, NormalSampler};
    ///
    /// let params = GbmParams::daily(0.05, 0.3).unwrap();
    /// let stepper = GbmStepper::new(params, NormalSampler::Gaussian);
    /// let mut rng = HedgeRng::from_seed(1);
    /// let week: Vec<f64> = stepper.path(100.0, &mut rng).take(7).collect();
    /// assert_eq!(week.len(), 7);
    /// assert!(week.iter().all(|&p| p > 0.0));
    /// ```
    pub fn path<'a>(
        &'a self,
        start: f64,
        rng: &'a mut HedgeRng,
    ) -> impl Iterator<Item = f64> + 'a {
        let mut current = start;
        std::iter::repeat_with(move || {
            current = self.step(current, rng);
            current
        })
    }
}
