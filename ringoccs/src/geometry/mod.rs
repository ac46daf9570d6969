//! Fresnel-kernel geometry: the stationary-phase function ψ, its φ-derivatives, the
//! circular and elliptical ring-intercept variants, and the Fresnel scale.
//!
//! `psi` follows the standard Marouf-Tyler-Rosen (1986) single-scattering geometry,
//! written in terms of the two dimensionless combinations
//!
//! ```text
//! xi(phi)  = cos(B)/D * (rho cos(phi) - rho0 cos(phi0))
//! eta(phi) = (rho^2 + rho0^2 - 2 rho rho0 cos(phi - phi0)) / D^2
//! psi(phi) = kD * (sqrt(1 + eta(phi) - 2 xi(phi)) - 1 + xi(phi))
//! ```
//!
//! `dpsi_dphi`/`d2psi_dphi2` differentiate this closed form analytically rather than by
//! finite differences, the same way the teacher differentiates filter coefficients in
//! closed form instead of sampling them numerically.

pub mod legendre;

pub use legendre::{dpsi_dphi_legendre, psi_legendre};

use num_traits::{Float, FloatConst};

fn xi<F: Float>(rho: F, rho0: F, phi: F, phi0: F, b: F, d: F) -> F {
    b.cos() / d * (rho * phi.cos() - rho0 * phi0.cos())
}

fn eta<F: Float>(rho: F, rho0: F, phi: F, phi0: F, d: F) -> F {
    (rho * rho + rho0 * rho0 - F::from(2.0).unwrap() * rho * rho0 * (phi - phi0).cos()) / (d * d)
}

/// Fresnel stationary-phase function ψ(φ).
pub fn psi<F: Float>(kd: F, rho: F, rho0: F, phi: F, phi0: F, b: F, d: F) -> F {
    let x = xi(rho, rho0, phi, phi0, b, d);
    let e = eta(rho, rho0, phi, phi0, d);
    kd * ((F::one() + e - F::from(2.0).unwrap() * x).sqrt() - F::one() + x)
}

/// First φ-derivative of ψ.
pub fn dpsi_dphi<F: Float>(kd: F, rho: F, rho0: F, phi: F, phi0: F, b: F, d: F) -> F {
    let x = xi(rho, rho0, phi, phi0, b, d);
    let e = eta(rho, rho0, phi, phi0, d);
    let f = (F::one() + e - F::from(2.0).unwrap() * x).sqrt();

    let dxi = -b.cos() / d * rho * phi.sin();
    let deta = F::from(2.0).unwrap() * rho * rho0 * (phi - phi0).sin() / (d * d);

    let df = (deta - F::from(2.0).unwrap() * dxi) / (F::from(2.0).unwrap() * f);
    kd * (df + dxi)
}

/// Second φ-derivative of ψ.
pub fn d2psi_dphi2<F: Float>(kd: F, rho: F, rho0: F, phi: F, phi0: F, b: F, d: F) -> F {
    let x = xi(rho, rho0, phi, phi0, b, d);
    let e = eta(rho, rho0, phi, phi0, d);
    let f = (F::one() + e - F::from(2.0).unwrap() * x).sqrt();

    let dxi = -b.cos() / d * rho * phi.sin();
    let deta = F::from(2.0).unwrap() * rho * rho0 * (phi - phi0).sin() / (d * d);
    let df = (deta - F::from(2.0).unwrap() * dxi) / (F::from(2.0).unwrap() * f);

    let d2xi = -b.cos() / d * rho * phi.cos();
    let d2eta = F::from(2.0).unwrap() * rho * rho0 * (phi - phi0).cos() / (d * d);
    let n_prime = d2eta - F::from(2.0).unwrap() * d2xi;

    let d2f = (n_prime * f - (deta - F::from(2.0).unwrap() * dxi) * df)
        / (F::from(2.0).unwrap() * f * f);
    kd * (d2f + d2xi)
}

/// First φ-derivative of ψ along a Keplerian ring-intercept ellipse with eccentricity
/// `ecc` and periapse longitude `peri`: `rho` is replaced by
/// `rho(phi) = rho0 (1-ecc^2) / (1 + ecc cos(phi - peri))`, so both ψ's explicit φ
/// dependence and its implicit dependence through `rho(phi)` contribute.
pub fn dpsi_dphi_ellipse<F: Float>(
    kd: F,
    rho0: F,
    phi: F,
    phi0: F,
    b: F,
    d: F,
    ecc: F,
    peri: F,
) -> F {
    let one = F::one();
    let two = F::from(2.0).unwrap();
    let denom = one + ecc * (phi - peri).cos();
    let r = rho0 * (one - ecc * ecc) / denom;
    let dr = r * r * ecc * (phi - peri).sin() / (rho0 * (one - ecc * ecc));

    let x = xi(r, rho0, phi, phi0, b, d);
    let e = eta(r, rho0, phi, phi0, d);
    let f = (one + e - two * x).sqrt();

    let dxi = b.cos() / d * (dr * phi.cos() - r * phi.sin());
    let deta = (two * dr * (r - rho0 * (phi - phi0).cos())
        + two * r * rho0 * (phi - phi0).sin())
        / (d * d);

    let df = (deta - two * dxi) / (two * f);
    kd * (df + dxi)
}

/// Additive perturbation polynomial `sum_k perturb[k] * ((rho-rho0)/d)^(k+1)` added to ψ
/// by the `NewtonPerturbed` driver. Has no φ dependence, so it never enters a derivative.
pub fn perturbation<F: Float>(rho: F, rho0: F, d: F, perturb: &[F; 5]) -> F {
    let u = (rho - rho0) / d;
    let mut sum = F::zero();
    let mut power = u;
    for &c in perturb.iter() {
        sum = sum + c * power;
        power = power * u;
    }
    sum
}

/// Ring radius implied by a Keplerian ellipse with eccentricity `ecc`, pericenter azimuth
/// `peri`, and semi-major axis `a`, at azimuth `phi`.
pub fn ellipse_radius<F: Float>(a: F, phi: F, ecc: F, peri: F) -> F {
    a * (F::one() - ecc * ecc) / (F::one() + ecc * (phi - peri).cos())
}

/// Fresnel scale `sqrt(lambda D (1 - cos^2(B) sin^2(phi)) / (2 sin^2(B)))`.
pub fn fresnel_scale<F: Float + FloatConst>(lambda: F, d: F, phi: F, b: F) -> F {
    let sin_b = b.sin();
    let cos_b = b.cos();
    let sin_phi = phi.sin();
    let numerator = lambda * d * (F::one() - cos_b * cos_b * sin_phi * sin_phi);
    (numerator / (F::from(2.0).unwrap() * sin_b * sin_b)).sqrt()
}
