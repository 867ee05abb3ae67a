//! Unit-normal samplers used to drive the price path.

use super::HedgeRng;

/// Source of approximately standard normal shocks.
///
/// `Gaussian` is a true standard normal. `IrwinHall` sums four uniforms and
/// subtracts two: mean zero, but variance 1/3 and lighter tails than a normal,
/// so paths driven by it are calmer than the configured volatility implies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NormalSampler {
    /// Ziggurat standard normal
    #[default]
    Gaussian,
    /// Sum of four uniforms minus two
    IrwinHall,
}

impl NormalSampler {
    /// Number of uniforms summed by the Irwin-Hall approximation.
    pub const IRWIN_HALL_TERMS: usize = 4;

    /// Draws one shock.
    #[inline]
    pub fn draw(&self, rng: &mut HedgeRng) -> f64 {
        match self {
            NormalSampler::Gaussian => rng.gen_normal(),
            NormalSampler::IrwinHall => {
                let sum: f64 = (0..Self::IRWIN_HALL_TERMS).map(|_| rng.gen_uniform()).sum();
                sum - Self::IRWIN_HALL_TERMS as f64 / 2.0
            }
        }
    }

    /// Theoretical variance of one draw.
    pub fn variance(&self) -> f64 {
        match self {
            NormalSampler::Gaussian => 1.0,
            NormalSampler::IrwinHall => Self::IRWIN_HALL_TERMS as f64 / 12.0,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            NormalSampler::Gaussian => "gaussian",
            NormalSampler::IrwinHall => "irwin_hall",
        }
    }
}
