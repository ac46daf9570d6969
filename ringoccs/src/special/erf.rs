//! Error function and its complement.
//!
//! `erfc` is the primary implementation (Numerical Recipes 6.2's rational/exponential
//! approximation, fractional error below `1.2e-7`); `erf` is derived from it as
//! `1 - erfc`, mirroring `original_source/rss_ringoccs/.../rss_ringoccs_erf.c`, which
//! defines `erf` in terms of `erfc` rather than the other way around.

use num_traits::Float;

/// Complementary error function, `1 - erf(x)`.
pub fn erfc<F: Float>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    let z = x.abs();
    let t = F::one() / (F::one() + F::from(0.5).unwrap() * z);
    let poly = F::from(-1.26551223).unwrap()
        + t * (F::from(1.00002368).unwrap()
            + t * (F::from(0.37409196).unwrap()
                + t * (F::from(0.09678418).unwrap()
                    + t * (F::from(-0.18628806).unwrap()
                        + t * (F::from(0.27886807).unwrap()
                            + t * (F::from(-1.13520398).unwrap()
                                + t * (F::from(1.48851587).unwrap()
                                    + t * (F::from(-0.82215223).unwrap()
                                        + t * F::from(0.17087277).unwrap()))))))));
    let ans = t * (-z * z + poly).exp();
    if x >= F::zero() {
        ans
    } else {
        F::from(2.0).unwrap() - ans
    }
}

/// Error function.
pub fn erf<F: Float>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    F::one() - erfc(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn erf_zero_is_zero() {
        assert_relative_eq!(erf(0.0_f64), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn erf_known_value() {
        // erf(1) = 0.8427008...
        assert_relative_eq!(erf(1.0_f64), 0.8427007929497149, epsilon = 1e-6);
    }

    #[test]
    fn erf_is_odd() {
        assert_relative_eq!(erf(-1.5_f64), -erf(1.5_f64), epsilon = 1e-6);
    }

    #[test]
    fn erfc_complements_erf() {
        let x = 0.7_f64;
        assert_relative_eq!(erf(x) + erfc(x), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn erf_saturates_at_large_argument() {
        assert_relative_eq!(erf(6.0_f64), 1.0, epsilon = 1e-6);
        assert_relative_eq!(erf(-6.0_f64), -1.0, epsilon = 1e-6);
    }
}
