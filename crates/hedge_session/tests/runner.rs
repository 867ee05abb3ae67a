//! Real-time runner tests on paused tokio time.

use std::time::Duration;

use hedge_models::rng::HedgeRng;
use hedge_session::prelude::*;

fn session(best: Option<f64>) -> Session {
    Session::with_scenario(
        SessionConfig::default(),
        ScenarioKind::Straddle,
        HedgeRng::from_seed(17),
        best,
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_runner_plays_to_game_over_and_saves_best() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());
    let mut views = handle.views();

    handle.advance_to_active().unwrap();
    let final_view = views
        .wait_for(|view| view.phase == SessionPhase::GameOver)
        .await
        .unwrap()
        .clone();

    assert_eq!(final_view.elapsed_days, 60);
    assert_eq!(final_view.days_remaining, 0);
    let summary = final_view.summary.unwrap();

    handle.close().unwrap();
    let exit = join.await.unwrap();
    assert_eq!(exit.store.load().unwrap(), Some(summary.final_value));
    assert_eq!(exit.session.stats().ticks, 60);
}

#[tokio::test(start_paused = true)]
async fn test_runner_does_not_overwrite_higher_best() {
    let store = InMemoryScoreStore::with_best(1.0e9);
    let (join, handle) = SessionRunner::spawn(session(Some(1.0e9)), store);
    let mut views = handle.views();

    handle.advance_to_active().unwrap();
    views
        .wait_for(|view| view.phase == SessionPhase::GameOver)
        .await
        .unwrap();

    handle.close().unwrap();
    let exit = join.await.unwrap();
    assert_eq!(exit.store.load().unwrap(), Some(1.0e9));
}

#[tokio::test(start_paused = true)]
async fn test_runner_respects_stored_best_unknown_to_session() {
    let store = InMemoryScoreStore::with_best(1.0e9);
    let session = Session::with_scenario(
        SessionConfig::default(),
        ScenarioKind::NakedCall,
        HedgeRng::from_seed(17),
        None,
    )
    .unwrap();
    let (join, handle) = SessionRunner::spawn(session, store);
    let mut views = handle.views();

    handle.advance_to_active().unwrap();
    let summary = views
        .wait_for(|view| view.phase == SessionPhase::GameOver)
        .await
        .unwrap()
        .summary
        .unwrap();

    assert!(!summary.is_new_best);
    assert_eq!(summary.previous_best, Some(1.0e9));

    handle.close().unwrap();
    let exit = join.await.unwrap();
    assert_eq!(exit.store.load().unwrap(), Some(1.0e9));
    assert_eq!(exit.session.best_score(), Some(1.0e9));
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_before_activation() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.latest().phase, SessionPhase::Intro);
    assert_eq!(handle.latest().elapsed_days, 0);

    handle.close().unwrap();
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_close_stops_ticking() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());

    handle.advance_to_active().unwrap();
    // Ticks land at 1000ms, ~1992ms and ~2975ms; the fourth is due at ~3950ms
    tokio::time::sleep(Duration::from_millis(3500)).await;
    handle.close().unwrap();

    let exit = join.await.unwrap();
    assert_eq!(exit.session.market().elapsed_days(), 3);
    assert_eq!(exit.session.phase(), SessionPhase::Active);
    assert!(handle.trade(1.0).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handles_stops_runner() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());
    handle.advance_to_active().unwrap();
    drop(handle);

    let exit = join.await.unwrap();
    assert!(exit.session.market().elapsed_days() < 60);
}

#[tokio::test(start_paused = true)]
async fn test_trade_command_updates_view() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());
    let mut views = handle.views();

    handle.advance_to_active().unwrap();
    handle.trade(50.0).unwrap();
    let view = views
        .wait_for(|view| view.shares_held == 50.0)
        .await
        .unwrap()
        .clone();

    assert_eq!(view.cash, -5000.0);
    assert_eq!(view.elapsed_days, 0);

    handle.close().unwrap();
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_rejected_trade_is_ignored() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());

    // Still in Intro: the runner drops the trade and keeps running
    handle.trade(25.0).unwrap();
    handle.advance_to_active().unwrap();
    let mut views = handle.views();
    views
        .wait_for(|view| view.phase == SessionPhase::Active)
        .await
        .unwrap();

    assert_eq!(handle.latest().shares_held, 0.0);
    handle.close().unwrap();
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_reset_returns_to_intro() {
    let (join, handle) = SessionRunner::spawn(session(None), InMemoryScoreStore::new());
    let mut views = handle.views();

    handle.advance_to_active().unwrap();
    views
        .wait_for(|view| view.elapsed_days == 2)
        .await
        .unwrap();
    handle.reset().unwrap();
    views
        .wait_for(|view| view.phase == SessionPhase::Intro)
        .await
        .unwrap();

    // Clock is stopped again after reset
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(handle.latest().elapsed_days, 0);

    handle.close().unwrap();
    join.await.unwrap();
}
