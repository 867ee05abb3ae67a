//! # Hedge Models (M: Maths)
//!
//! Numerical building blocks of the delta-hedging simulator.
//!
//! This crate provides:
//! - Closed-form Black-Scholes price, delta, and gamma for one option leg
//! - Geometric Brownian Motion price steps with a restartable lazy path
//! - A seeded random source and the unit-normal shock samplers
//!
//! ## Design Principles
//!
//! - **Pure functions** for pricing and stepping; all state is threaded by the caller
//! - **Static dispatch**: samplers and option kinds are closed enums
//! - **Validation at construction**: `BlackScholes::new` and `GbmParams::new`
//!   reject invalid parameters, the hot-path functions only debug-assert

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod models;
pub mod rng;
