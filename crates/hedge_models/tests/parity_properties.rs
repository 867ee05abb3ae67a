//! Property tests for the closed-form pricing identities.

use approx::assert_relative_eq;
use hedge_models::analytical::{delta, price, OptionKind};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// C − P = S − K·e^(−rT) for any unexpired leg.
    #[test]
    fn prop_put_call_parity(
        spot in 20.0..300.0_f64,
        strike in 20.0..300.0_f64,
        expiry in 0.001..3.0_f64,
        rate in 0.0..0.15_f64,
        volatility in 0.05..1.0_f64,
    ) {
        let call = price(OptionKind::Call, spot, strike, expiry, rate, volatility);
        let put = price(OptionKind::Put, spot, strike, expiry, rate, volatility);
        let forward = spot - strike * (-rate * expiry).exp();
        prop_assert!(
            (call - put - forward).abs() < 1e-3,
            "parity broken: C={} P={} S-Ke^-rT={}", call, put, forward
        );
    }

    /// Call delta − put delta = 1 for any unexpired leg.
    #[test]
    fn prop_delta_parity(
        spot in 20.0..300.0_f64,
        strike in 20.0..300.0_f64,
        expiry in 0.001..3.0_f64,
        rate in 0.0..0.15_f64,
        volatility in 0.05..1.0_f64,
    ) {
        let call = delta(OptionKind::Call, spot, strike, expiry, rate, volatility);
        let put = delta(OptionKind::Put, spot, strike, expiry, rate, volatility);
        prop_assert!((call - put - 1.0).abs() < 1e-9);
    }

    /// Prices never fall below intrinsic value discounted at the strike.
    #[test]
    fn prop_price_above_lower_bound(
        spot in 20.0..300.0_f64,
        strike in 20.0..300.0_f64,
        expiry in 0.0..3.0_f64,
        volatility in 0.05..1.0_f64,
    ) {
        let rate = 0.05;
        let call = price(OptionKind::Call, spot, strike, expiry, rate, volatility);
        let lower = (spot - strike * (-rate * expiry).exp()).max(0.0);
        prop_assert!(call >= lower - 1e-4, "call {} below bound {}", call, lower);
    }
}

#[test]
fn test_expiry_step_function() {
    let (r, sigma) = (0.05, 0.30);
    assert_eq!(price(OptionKind::Call, 110.0, 100.0, 0.0, r, sigma), 10.0);
    assert_eq!(delta(OptionKind::Call, 110.0, 100.0, 0.0, r, sigma), 1.0);
    assert_eq!(price(OptionKind::Call, 90.0, 100.0, 0.0, r, sigma), 0.0);
    assert_eq!(delta(OptionKind::Call, 90.0, 100.0, 0.0, r, sigma), 0.0);
}

#[test]
fn test_reference_fixture() {
    let call = price(OptionKind::Call, 100.0, 100.0, 1.0, 0.05, 0.30);
    let call_delta = delta(OptionKind::Call, 100.0, 100.0, 1.0, 0.05, 0.30);
    assert_relative_eq!(call, 14.23, epsilon = 0.01);
    assert_relative_eq!(call_delta, 0.6243, epsilon = 0.001);
}
