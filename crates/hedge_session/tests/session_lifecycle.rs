//! End-to-end lifecycle tests driving a session by hand.

use approx::assert_relative_eq;
use hedge_models::analytical::{delta, OptionKind};
use hedge_models::rng::{HedgeRng, NormalSampler};
use hedge_session::prelude::*;
use proptest::prelude::*;

fn start(kind: ScenarioKind, seed: u64) -> Session {
    let mut session =
        Session::with_scenario(SessionConfig::default(), kind, HedgeRng::from_seed(seed), None)
            .unwrap();
    session.advance_to_active().unwrap();
    session
}

#[test]
fn test_exactly_sixty_ticks_to_expiry() {
    let mut session = start(ScenarioKind::Straddle, 2024);

    let mut ticks = 0;
    let mut summary = None;
    while let Some(outcome) = session.tick() {
        ticks += 1;
        assert_eq!(outcome.day, ticks);
        if outcome.game_over.is_some() {
            summary = outcome.game_over;
        }
    }

    assert_eq!(ticks, 60);
    assert_eq!(session.phase(), SessionPhase::GameOver);
    assert_eq!(session.market().elapsed_days(), 60);
    assert_eq!(session.time_to_expiry(), 0.0);

    // No 61st tick
    assert!(session.tick().is_none());
    assert_eq!(session.market().elapsed_days(), 60);

    let summary = summary.unwrap();
    assert_relative_eq!(
        summary.final_value,
        session.snapshot().liquidation_value,
        epsilon = 1e-9
    );
}

#[test]
fn test_buy_fifty_at_one_hundred() {
    let mut session = start(ScenarioKind::NakedCall, 1);
    assert_eq!(session.market().latest_price(), 100.0);

    session.trade(50.0).unwrap();
    assert_eq!(session.portfolio().shares_held(), 50.0);
    assert_eq!(session.portfolio().cash(), -5000.0);

    let unit_delta = delta(OptionKind::Call, 100.0, 100.0, 60.0 / 365.0, 0.05, 0.30);
    assert_relative_eq!(
        session.snapshot().net_delta,
        50.0 - 1000.0 * unit_delta,
        epsilon = 1e-9
    );
}

#[test]
fn test_reward_accumulates_in_cash() {
    let mut session = start(ScenarioKind::Strangle, 8);
    let mut expected_cash = session.portfolio().cash();

    for _ in 0..10 {
        let exposure = session.snapshot().net_delta;
        let outcome = session.tick().unwrap();
        assert_eq!(outcome.reward, hedge_reward(exposure));
        expected_cash += outcome.reward;
        assert_relative_eq!(session.portfolio().cash(), expected_cash, epsilon = 1e-9);
    }
    assert_eq!(session.stats().ticks, 10);
}

#[test]
fn test_final_value_at_expiry_is_intrinsic() {
    let mut session = start(ScenarioKind::NakedCall, 99);
    let summary = run_headless(&mut session, HedgeStrategy::Idle).unwrap();

    let spot = session.market().latest_price();
    let intrinsic = (spot - 100.0).max(0.0);
    let expected = session.portfolio().cash() - 1000.0 * intrinsic;
    assert_relative_eq!(summary.final_value, expected, epsilon = 1e-9);
}

#[test]
fn test_best_score_carries_across_reset() {
    let mut session = start(ScenarioKind::Straddle, 31);
    let first = run_headless(&mut session, HedgeStrategy::DeltaNeutral).unwrap();
    assert!(first.is_new_best);

    session.reset();
    assert_eq!(session.phase(), SessionPhase::Intro);
    assert_eq!(session.best_score(), Some(first.final_value));

    let second = run_headless(&mut session, HedgeStrategy::Idle).unwrap();
    assert_eq!(second.previous_best, Some(first.final_value));
    assert_eq!(
        session.best_score(),
        Some(first.final_value.max(second.final_value))
    );
}

#[test]
fn test_window_caps_price_history() {
    let mut config = SessionConfig::default();
    config.price_window = 10;
    let mut session =
        Session::with_scenario(config, ScenarioKind::Straddle, HedgeRng::from_seed(4), None)
            .unwrap();
    run_headless(&mut session, HedgeStrategy::Idle).unwrap();

    assert_eq!(session.market().price_path().len(), 10);
    assert_eq!(session.view().price_path.len(), 10);
    assert_eq!(session.market().elapsed_days(), 60);
}

#[test]
fn test_irwin_hall_session_completes() {
    let config = SessionConfig::default()
        .with_seed(12)
        .with_sampler(NormalSampler::IrwinHall);
    let mut session = Session::new(config, None).unwrap();
    run_headless(&mut session, HedgeStrategy::Band { threshold: 100.0 }).unwrap();
    assert_eq!(session.stats().ticks, 60);
    assert!(session.market().price_path().all(|p| p > 0.0));
}

#[test]
fn test_view_serialises() {
    let session = start(ScenarioKind::Strangle, 6);
    let json = serde_json::to_string(&session.view()).unwrap();
    assert!(json.contains("\"phase\":\"active\""));
    assert!(json.contains("Short Strangle"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_prices_stay_positive(seed in any::<u64>()) {
        let mut session = start(ScenarioKind::Straddle, seed);
        while let Some(outcome) = session.tick() {
            prop_assert!(outcome.price > 0.0);
            prop_assert!(outcome.price.is_finite());
        }
    }

    #[test]
    fn prop_net_delta_shifts_one_for_one_with_shares(
        seed in any::<u64>(),
        shares in -2_000.0f64..2_000.0,
    ) {
        let mut session = start(ScenarioKind::Strangle, seed);
        let before = session.snapshot();
        session.trade(shares).unwrap();
        let after = session.snapshot();

        prop_assert!((after.net_delta - before.net_delta - shares).abs() < 1e-6);
        // Trading at the mark does not change liquidation value
        prop_assert!((after.liquidation_value - before.liquidation_value).abs() < 1e-6);
    }
}
