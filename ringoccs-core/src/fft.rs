//! FFT-backed linear convolution.
//!
//! The teacher's `num_rs::convolve` module declared a `ConvolveMode` enum and delegated
//! every variant to the `ndarray-conv` crate via `todo!()` stubs for the N-dimensional,
//! arbitrary-axis case. The reconstruction core only ever convolves two flat 1-D complex
//! sequences (an occultation slice and a single Fresnel-kernel tap), so this module
//! implements that one case directly on top of `rustfft` instead of pulling in a generic
//! N-dimensional convolution crate.

use num_complex::Complex;
use num_traits::{Float, NumAssign};
use rustfft::{FftNum, FftPlanner};

/// Smallest power of two `>= n`.
pub fn next_pow2(n: usize) -> usize {
    let mut p = 1usize;
    while p < n {
        p <<= 1;
    }
    p
}

/// Full linear convolution of `a` and `b` via zero-padded FFT.
///
/// Output length is `a.len() + b.len() - 1`, matching `numpy.convolve(..., mode="full")`.
pub fn fft_convolve_full<F>(a: &[Complex<F>], b: &[Complex<F>]) -> Vec<Complex<F>>
where
    F: FftNum + Float + NumAssign,
{
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let out_len = a.len() + b.len() - 1;
    let fft_len = next_pow2(out_len);

    let mut planner = FftPlanner::<F>::new();
    let fft = planner.plan_fft_forward(fft_len);
    let ifft = planner.plan_fft_inverse(fft_len);

    let mut av = vec![Complex::new(F::zero(), F::zero()); fft_len];
    let mut bv = vec![Complex::new(F::zero(), F::zero()); fft_len];
    av[..a.len()].copy_from_slice(a);
    bv[..b.len()].copy_from_slice(b);

    fft.process(&mut av);
    fft.process(&mut bv);
    for (x, y) in av.iter_mut().zip(bv.iter()) {
        *x *= *y;
    }
    ifft.process(&mut av);

    let scale = F::from(fft_len).unwrap().recip();
    av.truncate(out_len);
    for v in av.iter_mut() {
        *v = *v * scale;
    }
    av
}

/// Central `len` samples of the full convolution of `a` and `b`, i.e. `numpy.convolve(...,
/// mode="same")` when `len == a.len()`.
pub fn fft_convolve_same<F>(a: &[Complex<F>], b: &[Complex<F>], len: usize) -> Vec<Complex<F>>
where
    F: FftNum + Float + NumAssign,
{
    let full = fft_convolve_full(a, b);
    let trim_front = (full.len().saturating_sub(len)) / 2;
    full.into_iter().skip(trim_front).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn full_matches_direct_convolution() {
        let a = [c(1.0), c(2.0), c(3.0)];
        let b = [c(4.0), c(5.0), c(6.0)];
        let got = fft_convolve_full(&a, &b);
        let expected = [4.0, 13.0, 28.0, 27.0, 18.0];
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected.iter()) {
            assert!((g.re - e).abs() < 1e-9, "{} != {}", g.re, e);
            assert!(g.im.abs() < 1e-9);
        }
    }

    #[test]
    fn same_matches_numpy_same() {
        let a = [c(1.0), c(2.0), c(3.0), c(4.0)];
        let b = [c(1.0), c(2.0), c(1.5)];
        let got = fft_convolve_same(&a, &b, a.len());
        let expected = [4.0, 8.5, 13.0, 12.5];
        for (g, e) in got.iter().zip(expected.iter()) {
            assert!((g.re - e).abs() < 1e-9, "{} != {}", g.re, e);
        }
    }

    #[test]
    fn next_pow2_values() {
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(2), 2);
        assert_eq!(next_pow2(3), 4);
        assert_eq!(next_pow2(1025), 2048);
    }
}
