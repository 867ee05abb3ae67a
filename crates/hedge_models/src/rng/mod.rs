//! # Random Number Generation
//!
//! - [`prng`]: seeded `StdRng` wrapper ([`HedgeRng`])
//! - [`sampler`]: unit-normal shock sources ([`NormalSampler`])
//!
//! All generators are seedable so a session's price path can be reproduced
//! from the seed recorded in its logs.

pub mod prng;
pub mod sampler;

pub use prng::HedgeRng;
pub use sampler::NormalSampler;
