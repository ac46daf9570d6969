//! Window-width planner: converts a requested radial resolution into a per-output-sample
//! window width and point count, optionally via the Allen deconvolution `b`-factor.

use num_traits::{Float, FloatConst, ToPrimitive};

use crate::windows::{normalized_equivalent_width, WindowFamily};
use ringoccs_core::{Error, Result};

/// Forward function `y / (e^{-y} + y - 1)` that `special::resolution_inverse` inverts;
/// used here to solve the Allen `b`-factor width equation for `w` directly instead of by
/// iterating `resolution_inverse` itself.
fn b_factor_forward<F: Float>(y: F) -> F {
    y / ((-y).exp() + y - F::one())
}

/// Planned per-output window geometry.
#[derive(Debug, Clone)]
pub struct Plan<F> {
    /// Physical window width in km, one entry per output sample.
    pub w_km: alloc::vec::Vec<F>,
    /// Number of points spanned by the window (always odd), one entry per output sample.
    pub n_pts: alloc::vec::Vec<usize>,
}

/// Per-output equivalent width, cached once per window family (closed forms for
/// `Rect`/`Coss`, a dense-grid estimate otherwise).
fn equivalent_width<F: Float + FloatConst>(window: &WindowFamily<F>) -> F {
    match window {
        WindowFamily::Rect => F::one(),
        WindowFamily::Coss => F::from(0.5).unwrap(),
        _ => {
            let samples = window.sample(F::one(), 4001);
            normalized_equivalent_width(&samples, samples.len())
        }
    }
}

/// Plans window widths and point counts for every output sample `i` in
/// `[start, start+n_used)`.
///
/// `res` is the requested radial resolution, `f_km`/`kd`/`d_km` the per-sample Fresnel
/// scale / wavenumber-distance product / observer distance, `dx` the constant sample
/// spacing, `n` the total number of samples available (used for the feasibility check).
#[allow(clippy::too_many_arguments)]
pub fn plan<F: Float + FloatConst>(
    res: F,
    f_km: &[F],
    kd: &[F],
    d_km: &[F],
    f_sky_hz: Option<&[F]>,
    dx: F,
    window: &WindowFamily<F>,
    bfac: bool,
    sigma: F,
    start: usize,
    n_used: usize,
    n: usize,
) -> Result<Plan<F>> {
    let eta = equivalent_width(window);
    let two = F::from(2.0).unwrap();

    let mut w_km = alloc::vec::Vec::with_capacity(n_used);
    let mut n_pts = alloc::vec::Vec::with_capacity(n_used);

    for i in start..start + n_used {
        let f = f_km[i];
        let mut w = if !bfac {
            two * f * f * eta / res
        } else {
            let omega = match f_sky_hz {
                Some(f_sky) => F::from(2.0).unwrap() * F::PI() * f_sky[i],
                None => kd[i] / d_km[i],
            };
            let b = (omega * sigma) * (omega * sigma) / (two * f * f);
            let y = (res / f) * (res / f);
            let x = b_factor_forward(y);
            if x.is_finite() && b != F::zero() {
                x * f * f / b
            } else {
                two * f * f * eta / res
            }
        };
        w = w.max(two * dx);

        let half_pts = (w / (two * dx)).round();
        let pts = (half_pts.to_usize().unwrap_or(0)) * 2 + 1;

        let half = pts / 2;
        if i < half || i + half >= n {
            return Err(Error::WindowInfeasible);
        }

        w_km.push(w);
        n_pts.push(pts);
    }

    Ok(Plan { w_km, n_pts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_returns_odd_point_counts() {
        let n = 2001;
        let f_km = alloc::vec![1.0_f64; n];
        let kd = alloc::vec![2000.0_f64; n];
        let d_km = alloc::vec![200000.0_f64; n];
        let dx = 0.25_f64;
        let window = WindowFamily::kaiser_bessel_2_0();
        let result = plan(1.0, &f_km, &kd, &d_km, None, dx, &window, false, 1.0, 500, 1000, n)
            .expect("plan should be feasible");
        for &p in &result.n_pts {
            assert_eq!(p % 2, 1);
        }
        assert_eq!(result.w_km.len(), 1000);
    }

    #[test]
    fn plan_rejects_windows_that_overshoot_the_data() {
        let n = 10;
        let f_km = alloc::vec![1.0_f64; n];
        let kd = alloc::vec![2000.0_f64; n];
        let d_km = alloc::vec![200000.0_f64; n];
        let dx = 0.25_f64;
        let window = WindowFamily::Rect;
        let result = plan(0.05, &f_km, &kd, &d_km, None, dx, &window, false, 1.0, 0, n, n);
        assert!(matches!(result, Err(Error::WindowInfeasible)));
    }
}
