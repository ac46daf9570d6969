//! Squared-cosine window.

use num_traits::{Float, FloatConst};

/// `cos^2(pi x / w)` for `|x| < w/2`, else `0`.
pub fn coss<F: Float + FloatConst>(x: F, w: F) -> F {
    let half_w = w / F::from(2.0).unwrap();
    if x.abs() < half_w {
        let c = (F::PI() * x / w).cos();
        c * c
    } else {
        F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coss_peaks_at_center() {
        assert_relative_eq!(coss(0.0_f64, 2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn coss_vanishes_at_edge() {
        assert_relative_eq!(coss(1.0_f64, 2.0), 0.0, epsilon = 1e-9);
    }
}
