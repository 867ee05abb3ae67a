//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function
//! - `norm_pdf`: probability density function
//!
//! Both are generic over `T: Float` so the pricing formulas can be evaluated
//! in `f32` or `f64` without duplication.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun formula 7.1.26.
///
/// Maximum absolute error is 1.5e-7 over the whole real line. Negative
/// arguments use the reflection erfc(-x) = 2 - erfc(x).
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = constant::<T>(0.254829592);
    let a2 = constant::<T>(-0.284496736);
    let a3 = constant::<T>(1.421413741);
    let a4 = constant::<T>(-1.453152027);
    let a5 = constant::<T>(1.061405429);
    let p = constant::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        constant::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Converts an `f64` literal into `T`.
///
/// Every `Float` implementor can represent the small literals used here, so the
/// fallback to zero is never taken in practice.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½ · erfc(−x / √2)
///
/// # Accuracy
/// Agrees with the exact CDF to better than 1e-7 for all finite `x`.
///
/// # Examples
/// ```
/// use hedge_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let arg = -x / constant::<T>(std::f64::consts::SQRT_2);
    constant::<T>(0.5) * erfc_approx(arg)
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / √(2π)) · exp(−x² / 2)
///
/// # Examples
/// ```
/// use hedge_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let exponent = -constant::<T>(0.5) * x * x;
    constant::<T>(FRAC_1_SQRT_2PI) * exponent.exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.96_f64), 0.9750021048517795, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.5_f64), 0.006209665325776132, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-4.0, -2.2, -0.7, 0.0, 0.3, 1.5, 3.9] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0_f64, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_norm_cdf_monotone_and_bounded() {
        let mut previous = 0.0_f64;
        for i in -80..=80 {
            let x = i as f64 / 10.0;
            let value = norm_cdf(x);
            assert!((0.0..=1.0).contains(&value), "Φ({}) = {} out of range", x, value);
            assert!(value >= previous - 1e-12, "Φ not monotone at {}", x);
            previous = value;
        }
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(1.0_f32) - 0.841_344_7).abs() < 1e-5);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), 0.3989422804014327, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(-1.0_f64), norm_pdf(1.0_f64), epsilon = 1e-15);
    }
}
