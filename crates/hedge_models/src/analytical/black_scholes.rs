//! Black-Scholes pricing for a single European option leg.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put Price**: P = K·e^(−rT)·N(−d₂) − S·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! ## Expiry boundary
//!
//! At T = 0 the closed form divides by zero, so price collapses to intrinsic
//! value and delta to a step function: call delta is 1 when S > K and 0
//! otherwise, put delta is −1 when S < K and 0 otherwise. At-the-money legs
//! therefore carry zero delta at expiry.

use num_traits::Float;

use super::distributions::{constant, norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Times to expiry at or below this are treated as expired.
pub const EXPIRY_EPSILON: f64 = 1e-10;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionKind {
    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        }
    }
}

/// Black-Scholes model for one spot, rate, and volatility.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (`f32` or `f64`)
///
/// # Examples
/// ```
/// use hedge_models::analytical::{BlackScholes, OptionKind};
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.3).unwrap();
/// let call = bs.price(OptionKind::Call, 100.0, 1.0);
/// let put = bs.price(OptionKind::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new model, rejecting non-positive spot or volatility.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self::new_unchecked(spot, rate, volatility))
    }

    /// Creates a model without validation.
    ///
    /// Callers guarantee `spot > 0` and `volatility > 0`.
    #[inline]
    pub fn new_unchecked(spot: T, rate: T, volatility: T) -> Self {
        debug_assert!(spot > T::zero(), "spot must be positive");
        debug_assert!(volatility > T::zero(), "volatility must be positive");
        Self {
            spot,
            rate,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn is_expired(expiry: T) -> bool {
        expiry <= constant::<T>(EXPIRY_EPSILON)
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Only meaningful for unexpired legs; the expiry branch of every formula
    /// bypasses it.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = constant::<T>(0.5);
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ − σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Price of one unit of the option.
    ///
    /// # Examples
    /// ```
    /// use hedge_models::analytical::{BlackScholes, OptionKind};
    ///
    /// let bs = BlackScholes::new(110.0_f64, 0.05, 0.3).unwrap();
    /// assert_eq!(bs.price(OptionKind::Call, 100.0, 0.0), 10.0);
    /// ```
    #[inline]
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        let zero = T::zero();

        if Self::is_expired(expiry) {
            let intrinsic = match kind {
                OptionKind::Call => self.spot - strike,
                OptionKind::Put => strike - self.spot,
            };
            return intrinsic.max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match kind {
            OptionKind::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionKind::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        }
    }

    /// Delta (∂V/∂S) of one unit of the option.
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) − 1
    #[inline]
    pub fn delta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        let one = T::one();
        let zero = T::zero();

        if Self::is_expired(expiry) {
            return match kind {
                OptionKind::Call if self.spot > strike => one,
                OptionKind::Put if self.spot < strike => -one,
                _ => zero,
            };
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match kind {
            OptionKind::Call => n_d1,
            OptionKind::Put => n_d1 - one,
        }
    }

    /// Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = φ(d₁) / (S·σ·√T), zero once expired.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return T::zero();
        }
        let d1 = self.d1(strike, expiry);
        norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }
}

/// Unit price of a European option.
///
/// # Preconditions
/// `spot > 0`, `strike > 0`, `expiry >= 0`, `volatility > 0`. These are
/// session constants validated upstream and are only checked by debug
/// assertions here.
///
/// # Examples
/// ```
/// use hedge_models::analytical::{price, OptionKind};
///
/// let call = price(OptionKind::Call, 100.0_f64, 100.0, 1.0, 0.05, 0.30);
/// assert!((call - 14.23).abs() < 0.01);
/// ```
#[inline]
pub fn price<T: Float>(
    kind: OptionKind,
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    volatility: T,
) -> T {
    debug_preconditions(strike, expiry);
    BlackScholes::new_unchecked(spot, rate, volatility).price(kind, strike, expiry)
}

/// Unit delta of a European option.
///
/// Same preconditions as [`price`].
///
/// # Examples
/// ```
/// use hedge_models::analytical::{delta, OptionKind};
///
/// assert_eq!(delta(OptionKind::Call, 110.0_f64, 100.0, 0.0, 0.05, 0.30), 1.0);
/// assert_eq!(delta(OptionKind::Put, 110.0_f64, 100.0, 0.0, 0.05, 0.30), 0.0);
/// ```
#[inline]
pub fn delta<T: Float>(
    kind: OptionKind,
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    volatility: T,
) -> T {
    debug_preconditions(strike, expiry);
    BlackScholes::new_unchecked(spot, rate, volatility).delta(kind, strike, expiry)
}

/// Unit gamma of a European option.
///
/// Same preconditions as [`price`].
#[inline]
pub fn gamma<T: Float>(spot: T, strike: T, expiry: T, rate: T, volatility: T) -> T {
    debug_preconditions(strike, expiry);
    BlackScholes::new_unchecked(spot, rate, volatility).gamma(strike, expiry)
}

#[inline]
fn debug_preconditions<T: Float>(strike: T, expiry: T) {
    debug_assert!(strike > T::zero(), "strike must be positive");
    debug_assert!(expiry >= T::zero(), "time to expiry must be non-negative");
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const R: f64 = 0.05;
    const SIGMA: f64 = 0.30;

    // ==========================================================
    // Constructor
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0_f64, R, SIGMA).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), R);
        assert_eq!(bs.volatility(), SIGMA);
    }

    #[test]
    fn test_new_rejects_non_positive_spot() {
        match BlackScholes::new(0.0_f64, R, SIGMA) {
            Err(AnalyticalError::InvalidSpot { spot }) => assert_eq!(spot, 0.0),
            other => panic!("Expected InvalidSpot, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_non_positive_volatility() {
        match BlackScholes::new(100.0_f64, R, -0.1) {
            Err(AnalyticalError::InvalidVolatility { volatility }) => assert_eq!(volatility, -0.1),
            other => panic!("Expected InvalidVolatility, got {:?}", other),
        }
        assert!(BlackScholes::new(100.0_f64, R, 0.0).is_err());
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.01, SIGMA).is_ok());
    }

    // ==========================================================
    // Reference values
    // ==========================================================

    #[test]
    fn test_call_reference_fixture() {
        let call = price(OptionKind::Call, 100.0, 100.0, 1.0, R, SIGMA);
        assert_relative_eq!(call, 14.2313, epsilon = 1e-3);
    }

    #[test]
    fn test_call_delta_reference_fixture() {
        // N(d1) with d1 = 0.095 / 0.3
        let d = delta(OptionKind::Call, 100.0, 100.0, 1.0, R, SIGMA);
        assert_relative_eq!(d, 0.62425, epsilon = 1e-3);
    }

    #[test]
    fn test_put_reference_fixture() {
        let put = price(OptionKind::Put, 100.0, 100.0, 1.0, R, SIGMA);
        assert_relative_eq!(put, 9.3542, epsilon = 1e-3);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0_f64, R, SIGMA).unwrap();
        let d1 = bs.d1(105.0, 0.5);
        let d2 = bs.d2(105.0, 0.5);
        assert_relative_eq!(d2, d1 - SIGMA * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    // ==========================================================
    // Expiry boundary
    // ==========================================================

    #[test]
    fn test_call_at_expiry() {
        assert_eq!(price(OptionKind::Call, 110.0, 100.0, 0.0, R, SIGMA), 10.0);
        assert_eq!(delta(OptionKind::Call, 110.0, 100.0, 0.0, R, SIGMA), 1.0);
        assert_eq!(price(OptionKind::Call, 90.0, 100.0, 0.0, R, SIGMA), 0.0);
        assert_eq!(delta(OptionKind::Call, 90.0, 100.0, 0.0, R, SIGMA), 0.0);
    }

    #[test]
    fn test_put_at_expiry() {
        assert_eq!(price(OptionKind::Put, 90.0, 100.0, 0.0, R, SIGMA), 10.0);
        assert_eq!(delta(OptionKind::Put, 90.0, 100.0, 0.0, R, SIGMA), -1.0);
        assert_eq!(price(OptionKind::Put, 110.0, 100.0, 0.0, R, SIGMA), 0.0);
        assert_eq!(delta(OptionKind::Put, 110.0, 100.0, 0.0, R, SIGMA), 0.0);
    }

    #[test]
    fn test_at_the_money_at_expiry_has_no_delta() {
        assert_eq!(delta(OptionKind::Call, 100.0, 100.0, 0.0, R, SIGMA), 0.0);
        assert_eq!(delta(OptionKind::Put, 100.0, 100.0, 0.0, R, SIGMA), 0.0);
        assert_eq!(gamma(100.0, 100.0, 0.0, R, SIGMA), 0.0);
    }

    #[test]
    fn test_price_converges_to_intrinsic_near_expiry() {
        let call = price(OptionKind::Call, 120.0, 100.0, 1.0 / 365.0, R, SIGMA);
        assert!(call >= 20.0 && call < 20.1, "call = {}", call);
    }

    // ==========================================================
    // Greeks
    // ==========================================================

    #[test]
    fn test_delta_bounds() {
        for strike in [70.0, 90.0, 100.0, 110.0, 130.0] {
            let call = delta(OptionKind::Call, 100.0, strike, 0.5, R, SIGMA);
            let put = delta(OptionKind::Put, 100.0, strike, 0.5, R, SIGMA);
            assert!((0.0..=1.0).contains(&call));
            assert!((-1.0..=0.0).contains(&put));
        }
    }

    #[test]
    fn test_delta_vs_finite_difference() {
        let h = 0.01;
        for kind in [OptionKind::Call, OptionKind::Put] {
            let up = price(kind, 100.0 + h, 105.0, 0.25, R, SIGMA);
            let dn = price(kind, 100.0 - h, 105.0, 0.25, R, SIGMA);
            let fd = (up - dn) / (2.0 * h);
            assert_relative_eq!(delta(kind, 100.0, 105.0, 0.25, R, SIGMA), fd, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_gamma_vs_finite_difference() {
        let h = 0.01;
        let f = |s: f64| price(OptionKind::Call, s, 100.0, 0.5, R, SIGMA);
        let fd = (f(100.0 + h) - 2.0 * f(100.0) + f(100.0 - h)) / (h * h);
        assert_relative_eq!(gamma(100.0, 100.0, 0.5, R, SIGMA), fd, epsilon = 1e-3);
    }

    #[test]
    fn test_gamma_grows_toward_expiry_at_the_money() {
        let far = gamma(100.0, 100.0, 60.0 / 365.0, R, SIGMA);
        let near = gamma(100.0, 100.0, 5.0 / 365.0, R, SIGMA);
        assert!(near > far);
    }

    #[test]
    fn test_option_kind_helpers() {
        assert!(OptionKind::Call.is_call());
        assert!(!OptionKind::Put.is_call());
        assert_eq!(OptionKind::Put.name(), "Put");
    }
}
