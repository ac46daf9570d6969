//! Lambert W function and the resolution-inverse function built from it.
//!
//! Translated from `original_source/rss_ringoccs/diffrec/src/__math_function_lambertw.c`
//! and `__math_function_resolution_inverse.c`: a Halley-iteration solve for `W` seeded by
//! `ln(x/ln(x))` for `x > e`, generalized from that file's per-type `_Float`/`_Double`/
//! `_Long_Double` triplicate into one generic function.

use num_traits::Float;

const MAX_ITERS: usize = 100;

/// Principal branch of the Lambert W function, solving `w e^w = x`.
///
/// `x < -1/e` has no real solution and returns `NaN`; `x == -1/e` returns `-1`; `x`
/// approaching `+inf` returns `+inf`.
pub fn lambert_w<F: Float>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    let neg_inv_e = -F::one() / F::from(core::f64::consts::E).unwrap();
    if x.is_infinite() {
        return if x > F::zero() { F::infinity() } else { F::nan() };
    }
    if x < neg_inv_e {
        return F::nan();
    }
    if (x - neg_inv_e).abs() < F::epsilon() {
        return -F::one();
    }

    let two = F::from(2.0).unwrap();
    let mut w = if x > two {
        (x / x.ln()).ln()
    } else {
        x
    };

    let eps = F::from(1e-8).unwrap();
    for _ in 0..MAX_ITERS {
        let ew = w.exp();
        let wew_minus_x = w * ew - x;
        let denom = ew * (w + F::one()) - (w + two) * wew_minus_x / (two * w + two);
        if denom == F::zero() {
            break;
        }
        let dw = wew_minus_x / denom;
        w = w - dw;
        if dw.abs() < eps {
            break;
        }
    }
    w
}

/// Inverse of `y = x / (e^{-x} + x - 1)`, used to convert a requested resolution into
/// the Allen deconvolution `b` factor.
///
/// `x <= 1` is outside the domain of the forward function and returns `NaN`; `x == +inf`
/// returns `0`, matching the limiting behaviour of the original C routine.
pub fn resolution_inverse<F: Float>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return if x > F::zero() { F::zero() } else { F::nan() };
    }
    if x <= F::one() {
        return F::nan();
    }
    let p1 = x / (F::one() - x);
    let p2 = p1 * p1.exp();
    lambert_w(p2) - p1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lambert_w_zero_is_zero() {
        assert_relative_eq!(lambert_w(0.0_f64), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn lambert_w_at_e_is_one() {
        assert_relative_eq!(lambert_w(core::f64::consts::E), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn lambert_w_matches_known_value() {
        // W(1) = 0.5671432...
        assert_relative_eq!(lambert_w(1.0_f64), 0.5671432904097838, epsilon = 1e-9);
    }

    #[test]
    fn lambert_w_below_branch_point_is_nan() {
        assert!(lambert_w(-1.0_f64).is_nan());
    }

    #[test]
    fn lambert_w_at_branch_point() {
        let neg_inv_e = -1.0 / core::f64::consts::E;
        assert_relative_eq!(lambert_w(neg_inv_e), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn resolution_inverse_domain_floor() {
        assert!(resolution_inverse(1.0_f64).is_nan());
        assert!(resolution_inverse(0.5_f64).is_nan());
    }

    #[test]
    fn resolution_inverse_is_finite_above_one() {
        let v = resolution_inverse(10.0_f64);
        assert!(v.is_finite());
        assert!(v > 0.0);
    }

    #[test]
    fn resolution_inverse_at_infinity_is_zero() {
        assert_relative_eq!(resolution_inverse(f64::INFINITY), 0.0, epsilon = 1e-12);
    }
}
