//! Kaiser-Bessel and modified Kaiser-Bessel windows.
//!
//! Ported from `original_source/rss_ringoccs/src/special_functions/kaiser_bessel.c`:
//! `kb(x, W, alpha) = I0(pi alpha sqrt(1 - (2x/W)^2)) / I0(pi alpha)` inside the support,
//! `0` outside. The modified variant subtracts the (nonzero) edge value of the ordinary
//! Kaiser-Bessel window and renormalizes so the window reaches exactly `0` at `|x| = W/2`
//! instead of a small discontinuous step, matching the original library's
//! `Modified_Kaiser_Bessel_*` family referenced by
//! `_window_function_modified_kaiser_bessel_wrappers.h`.

use num_traits::{Float, FloatConst};

use crate::special::SpecialFunctions;

/// Ordinary Kaiser-Bessel window.
pub fn kaiser_bessel<F: Float + FloatConst>(x: F, w: F, alpha: F) -> F {
    let half_w = w / F::from(2.0).unwrap();
    let abs_x = x.abs();
    if abs_x >= half_w {
        return F::zero();
    }
    if alpha == F::zero() {
        return F::one();
    }
    let arg = F::from(2.0).unwrap() * abs_x / w;
    let inner = (F::one() - arg * arg).max(F::zero()).sqrt();
    let pa = F::PI() * alpha;
    (pa * inner).i0() / pa.i0()
}

/// Kaiser-Bessel window shifted and rescaled so it equals `0` at the edge of its support:
/// `(I0(alpha*pi*sqrt(1-(2x/W)^2)) - 1) / (I0(alpha*pi) - 1)`.
pub fn modified_kaiser_bessel<F: Float + FloatConst>(x: F, w: F, alpha: F) -> F {
    let half_w = w / F::from(2.0).unwrap();
    let abs_x = x.abs();
    if abs_x >= half_w {
        return F::zero();
    }
    let arg = F::from(2.0).unwrap() * abs_x / w;
    let inner = (F::one() - arg * arg).max(F::zero()).sqrt();
    let pa = F::PI() * alpha;
    let denom = pa.i0() - F::one();
    if denom == F::zero() {
        F::one()
    } else {
        ((pa * inner).i0() - F::one()) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kaiser_bessel_peaks_at_one() {
        assert_relative_eq!(kaiser_bessel(0.0_f64, 2.0, 2.5), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn kaiser_bessel_vanishes_past_support() {
        assert_eq!(kaiser_bessel(1.5_f64, 2.0, 2.5), 0.0);
    }

    #[test]
    fn kaiser_bessel_zero_alpha_is_rect() {
        assert_relative_eq!(kaiser_bessel(0.3_f64, 2.0, 0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn modified_kaiser_bessel_peaks_at_one() {
        assert_relative_eq!(
            modified_kaiser_bessel(0.0_f64, 2.0, 2.5),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn modified_kaiser_bessel_is_smaller_near_edge_than_plain() {
        let x = 0.9_f64;
        assert!(modified_kaiser_bessel(x, 2.0, 2.5) <= kaiser_bessel(x, 2.0, 2.5) + 1e-9);
    }
}
