//! Normalized-domain sinc function, `sin(x)/x`.

use num_traits::Float;

/// `sin(x)/x`, continuous (value `1`) at `x = 0`.
pub fn sinc<F: Float>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    if x.abs() < F::epsilon() {
        // Taylor expansion 1 - x^2/6 avoids the 0/0 form near the origin.
        F::one() - x * x / F::from(6.0).unwrap()
    } else {
        x.sin() / x
    }
}
