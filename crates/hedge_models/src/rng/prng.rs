//! Seeded pseudo-random source for price paths and scenario selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Simulation random number generator.
///
/// Wraps `StdRng` and remembers the seed it was initialised with so a session
/// can be replayed from its logs.
///
/// # Examples
///
/// ```rust
/// use hedge_models::rng::HedgeRng;
///
/// let mut a = HedgeRng::from_seed(7);
/// let mut b = HedgeRng::from_seed(7);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
#[derive(Debug, Clone)]
pub struct HedgeRng {
    inner: StdRng,
    seed: u64,
}

impl HedgeRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator with a seed drawn from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().gen())
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Standard normal variate via the ziggurat sampler in `rand_distr`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    #[inline]
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
