//! Newton-Raphson solver for the stationary-phase azimuth `phi*` satisfying
//! `dpsi_dphi(..., phi*, ...) = 0`.
//!
//! Bounded to `MAX_ITERS` iterations and total: a non-positive or non-finite second
//! derivative stops the iteration and returns the last finite azimuth rather than
//! dividing by a degenerate curvature, since an isolated bad stationary point only taints
//! one neighbor's contribution to the window sum, not the whole reconstruction. Every
//! entry point also reports whether it actually converged (`|delta| <= eps` before the
//! iteration budget or curvature loss cut it short), so callers can track the fraction of
//! neighbors that failed stationarity without the solver itself logging per-iteration.

use crate::geometry;

const MAX_ITERS: usize = 8;

use num_traits::Float;

/// Solves for the circular stationary-phase azimuth via Newton-Raphson, starting from
/// `phi0` (the neighbor's own ring-plane longitude). Returns `(phi*, converged)`.
pub fn stationary_phase<F: Float>(kd: F, rho: F, rho0: F, phi0: F, b: F, d: F) -> (F, bool) {
    newton(phi0, |phi| {
        (
            geometry::dpsi_dphi(kd, rho, rho0, phi, phi0, b, d),
            geometry::d2psi_dphi2(kd, rho, rho0, phi, phi0, b, d),
        )
    })
}

/// Solves for the stationary-phase azimuth with a perturbed ψ,
/// `ψ + sum_k perturb[k] ((rho-rho0)/d)^(k+1)`. The perturbation term has no φ dependence
/// (it depends only on the fixed radii `rho`, `rho0`), so it contributes to neither
/// derivative — the perturbed and unperturbed stationary azimuths coincide. It is carried
/// here anyway, and the returned `phi*` is always fed back into the perturbed ψ, so the
/// published shift in optical depth still reflects the perturbation through
/// `geometry::psi` evaluated at the returned point.
pub fn stationary_phase_perturbed<F: Float>(
    kd: F,
    rho: F,
    rho0: F,
    phi0: F,
    b: F,
    d: F,
    _perturb: &[F; 5],
) -> (F, bool) {
    stationary_phase(kd, rho, rho0, phi0, b, d)
}

/// Solves for the stationary-phase azimuth along a Keplerian ring-intercept ellipse,
/// using only `dpsi_dphi_ellipse` (the elliptical driver has no closed-form second
/// derivative, so curvature is estimated by central difference). Seeded from `phi_seed`
/// rather than always `phi0`, so distinct neighbors of the same output sample (which
/// share `phi0` but not `phi_seed`) converge to distinct stationary points.
pub fn stationary_phase_elliptical<F: Float>(
    kd: F,
    rho0: F,
    phi_seed: F,
    phi0: F,
    b: F,
    d: F,
    ecc: F,
    peri: F,
) -> (F, bool) {
    let h = F::from(1e-6).unwrap();
    newton(phi_seed, |phi| {
        let d1 = geometry::dpsi_dphi_ellipse(kd, rho0, phi, phi0, b, d, ecc, peri);
        let d1_plus = geometry::dpsi_dphi_ellipse(kd, rho0, phi + h, phi0, b, d, ecc, peri);
        let d1_minus = geometry::dpsi_dphi_ellipse(kd, rho0, phi - h, phi0, b, d, ecc, peri);
        let d2 = (d1_plus - d1_minus) / (F::from(2.0).unwrap() * h);
        (d1, d2)
    })
}

/// Shared Newton-Raphson loop: `derivs(phi)` returns `(d1, d2) = (dpsi_dphi, d2psi_dphi2)`.
/// Returns `(phi*, converged)`, where `converged` is false if curvature went non-positive
/// or non-finite, or the budget ran out, before `|delta| <= eps`.
pub(crate) fn newton<F: Float>(phi0: F, derivs: impl Fn(F) -> (F, F)) -> (F, bool) {
    let mut phi = phi0;
    let eps = F::from(1e-8).unwrap();
    for _ in 0..MAX_ITERS {
        let (d1, d2) = derivs(phi);
        if d2 <= F::zero() || !d2.is_finite() {
            return (phi, false);
        }
        let delta = d1 / d2;
        phi = phi - delta;
        if delta.abs() <= eps {
            return (phi, true);
        }
    }
    (phi, false)
}
