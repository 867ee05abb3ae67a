//! # Hedge Session (S: Session)
//!
//! Game layer of the delta-hedging simulator: the player is short a bundle
//! of options and trades the underlying to keep net delta near zero while
//! the price follows a GBM path to expiry.
//!
//! This crate provides:
//! - The scenario catalog and the position model (net delta, liquidation value)
//! - The per-tick hedge reward and the accelerating tick cadence
//! - [`session::Session`], a single-owner Intro → Active → GameOver state machine
//! - [`runner::SessionRunner`], a tokio driver that ticks in real time and
//!   persists the best score through a [`score_store::BestScoreStore`]
//! - Scripted hedging strategies for headless play
//!
//! ## Example
//!
//! ```
//! use hedge_session::prelude::*;
//!
//! let config = SessionConfig::default().with_seed(7);
//! let mut session = Session::new(config, None).unwrap();
//! let summary = run_headless(&mut session, HedgeStrategy::DeltaNeutral).unwrap();
//! assert_eq!(session.phase(), SessionPhase::GameOver);
//! assert!(summary.is_new_best);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod autopilot;
pub mod config;
pub mod error;
pub mod market;
pub mod position;
pub mod runner;
pub mod scenario;
pub mod score_store;
pub mod scoring;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::autopilot::{run_headless, HedgeStrategy};
    pub use crate::config::SessionConfig;
    pub use crate::error::{ScoreStoreError, SessionError};
    pub use crate::position::{Portfolio, PositionModel, PositionSnapshot};
    pub use crate::runner::{RunnerExit, SessionCommand, SessionHandle, SessionRunner};
    pub use crate::scenario::{Difficulty, OptionLeg, Scenario, ScenarioKind};
    pub use crate::score_store::{BestScoreStore, InMemoryScoreStore};
    pub use crate::scoring::{hedge_reward, HedgeQuality, SessionStats};
    pub use crate::session::{GameOverSummary, Session, SessionPhase, SessionView, TickOutcome};
}
