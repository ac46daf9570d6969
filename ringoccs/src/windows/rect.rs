//! Rectangular ("boxcar") window: `1` inside the support, `0` outside.
//!
//! Equivalent to no window at all, kept around for the same reason the teacher keeps
//! `Boxcar`: it is the baseline every other window is compared against.

use num_traits::Float;

/// `1` for `|x| < w/2`, else `0`.
pub fn rect<F: Float>(x: F, w: F) -> F {
    if x.abs() < w / F::from(2.0).unwrap() {
        F::one()
    } else {
        F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_one_at_center() {
        assert_eq!(rect(0.0_f64, 2.0), 1.0);
    }

    #[test]
    fn rect_is_zero_past_edge() {
        assert_eq!(rect(1.5_f64, 2.0), 0.0);
    }
}
