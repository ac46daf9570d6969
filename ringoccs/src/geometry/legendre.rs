//! Legendre/polynomial expansion of ψ in `u = (rho - rho0)/d`, evaluated at the
//! zeroth-order stationary azimuth `phi = phi0` so the Fresnel and Legendre drivers never
//! invoke trigonometry per neighbor.
//!
//! At `phi = phi0`, ψ collapses to `psi/kd = sqrt(1 - 2cu + u^2) - 1 + cu` with
//! `c = cos(b) cos(phi0)`. Writing `sqrt(1-2cu+u^2) = (1-2cu+u^2) * (1-2cu+u^2)^{-1/2}`
//! and using the Legendre generating function `(1-2cu+u^2)^{-1/2} = sum P_n(c) u^n`
//! gives the coefficient of `u^n` in the square root itself as
//! `Q_n(c) = P_n(c) - 2c P_{n-1}(c) + P_{n-2}(c)`. `Q_0 = 1` and `Q_1 = -c` exactly
//! cancel the `-1 + cu` correction, leaving a genuine `O(u^2)` series — the same
//! closed-form quadratic the `Fresnel` driver uses at `order = 2`.

use num_traits::Float;

/// Highest Legendre order this crate supports (`Algorithm::Legendre` caps `order` here).
pub const MAX_ORDER: usize = 256;

/// `Q_n(c)`, the coefficients of `u^n` in the Taylor series of `sqrt(1 - 2cu + u^2)`, for
/// `n = 0..=order`, computed on the stack via the standard three-term Legendre recurrence
/// `n P_n(c) = (2n-1) c P_{n-1}(c) - (n-1) P_{n-2}(c)`.
fn sqrt_coefficients<F: Float>(c: F, order: usize) -> ([F; MAX_ORDER + 1], usize) {
    let order = order.min(MAX_ORDER);
    let mut p = [F::zero(); MAX_ORDER + 1];
    p[0] = F::one();
    if order >= 1 {
        p[1] = c;
    }
    let two = F::from(2.0).unwrap();
    for k in 2..=order {
        let kf = F::from(k).unwrap();
        p[k] = ((two * kf - F::one()) * c * p[k - 1] - (kf - F::one()) * p[k - 2]) / kf;
    }

    let mut q = [F::zero(); MAX_ORDER + 1];
    for n in 0..=order {
        let pn = p[n];
        let pn1 = if n >= 1 { p[n - 1] } else { F::zero() };
        let pn2 = if n >= 2 { p[n - 2] } else { F::zero() };
        q[n] = pn - two * c * pn1 + pn2;
    }
    (q, order)
}

/// Legendre/polynomial expansion of ψ, truncated at `order` (`order >= 2`), evaluated
/// without ever computing a neighbor-dependent sine or cosine.
pub fn psi_legendre<F: Float>(order: u16, kd: F, rho: F, rho0: F, phi0: F, b: F, d: F) -> F {
    let c = b.cos() * phi0.cos();
    let u = (rho - rho0) / d;
    let (q, order) = sqrt_coefficients(c, (order as usize).max(2));

    let mut sum = F::zero();
    let mut power = F::one();
    for qn in q.iter().take(order + 1) {
        sum = sum + *qn * power;
        power = power * u;
    }
    kd * (sum - F::one() + c * u)
}

/// Derivative of `psi_legendre` with respect to `rho` (equivalently, `1/d` times the
/// derivative with respect to `u`). ψ has no explicit `phi` dependence left once it is
/// evaluated at the zeroth-order stationary azimuth, so this is the only derivative of
/// the closed-form expansion that is still meaningful; the name matches `dpsi_dphi` for
/// API symmetry with the exact geometry functions it stands in for.
pub fn dpsi_dphi_legendre<F: Float>(order: u16, kd: F, rho: F, rho0: F, phi0: F, b: F, d: F) -> F {
    let c = b.cos() * phi0.cos();
    let u = (rho - rho0) / d;
    let (q, order) = sqrt_coefficients(c, (order as usize).max(2));

    let mut sum = F::zero();
    let mut power = F::one();
    for (n, qn) in q.iter().take(order + 1).enumerate().skip(1) {
        sum = sum + F::from(n).unwrap() * *qn * power;
        power = power * u;
    }
    (kd / d) * (sum + c)
}
