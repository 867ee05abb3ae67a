//! Closed-form pricing for European options.
//!
//! - Black-Scholes unit price, delta, and gamma for a single leg
//! - Standard normal CDF and PDF used by the formulas
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the same formulas serve `f32` and `f64`
//! - **Preconditions, not guards**: the free functions assume validated
//!   session constants; [`BlackScholes::new`] is the validating entry point
//! - **Explicit expiry branch**: T = 0 collapses to intrinsic value and a step
//!   delta instead of evaluating d₁

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{delta, gamma, price, BlackScholes, OptionKind, EXPIRY_EPSILON};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
