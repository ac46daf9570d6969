//! Unnormalized Fresnel integrals `C(x) = ∫₀ˣ cos(πt²/2) dt` and `S(x) = ∫₀ˣ sin(πt²/2) dt`.
//!
//! These are the building blocks of the closed-form (order-1) `Fresnel` driver: the
//! single-knife-edge diffraction pattern is exactly the Fresnel integral evaluated at the
//! Fresnel-scaled edge offset. Small `|x|` uses the Maclaurin series directly; large `|x|`
//! uses the auxiliary-function asymptotic form (Abramowitz & Stegun 7.3.1-7.3.2) so that
//! the series, which needs `O(x)` terms to converge, never runs away.

use num_traits::{Float, FloatConst};

const SERIES_CUTOFF: f64 = 4.0;

/// Fresnel cosine integral.
pub fn fresnel_cos<F: Float + FloatConst>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return F::from(0.5).unwrap().copysign(x);
    }
    let sign = x.signum();
    let x = x.abs();
    let v = if x < F::from(SERIES_CUTOFF).unwrap() {
        cos_series(x)
    } else {
        let (f, g) = auxiliary(x);
        let arg = F::FRAC_PI_2() * x * x;
        F::from(0.5).unwrap() + f * arg.sin() - g * arg.cos()
    };
    v * sign
}

/// Fresnel sine integral.
pub fn fresnel_sin<F: Float + FloatConst>(x: F) -> F {
    if x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return F::from(0.5).unwrap().copysign(x);
    }
    let sign = x.signum();
    let x = x.abs();
    let v = if x < F::from(SERIES_CUTOFF).unwrap() {
        sin_series(x)
    } else {
        let (f, g) = auxiliary(x);
        let arg = F::FRAC_PI_2() * x * x;
        F::from(0.5).unwrap() - f * arg.cos() - g * arg.sin()
    };
    v * sign
}

// C(x) = sum_n (-1)^n (pi/2)^(2n) x^(4n+1) / ((2n)! (4n+1)).
// `core` tracks (-1)^n (pi/2)^(2n) x^(4n) / (2n)! and is advanced by the ratio
// core_{n+1}/core_n = -(pi/2)^2 x^4 / ((2n+1)(2n+2)).
fn cos_series<F: Float + FloatConst>(x: F) -> F {
    let half_pi_sq = F::FRAC_PI_2() * F::FRAC_PI_2();
    let x4 = x.powi(4);
    let mut core = F::one();
    let mut sum = x;
    let mut n = 0;
    for _ in 0..200 {
        let two_n = F::from(2 * n).unwrap();
        core = core * (-half_pi_sq * x4) / ((two_n + F::one()) * (two_n + F::from(2.0).unwrap()));
        n += 1;
        let contrib = core * x / F::from(4 * n + 1).unwrap();
        sum = sum + contrib;
        if contrib.abs() < F::epsilon() * sum.abs() + F::epsilon() {
            break;
        }
    }
    sum
}

// S(x) = sum_n (-1)^n (pi/2)^(2n+1) x^(4n+3) / ((2n+1)! (4n+3)).
// `core` tracks (-1)^n (pi/2)^(2n+1) x^(4n) / (2n+1)!.
fn sin_series<F: Float + FloatConst>(x: F) -> F {
    let half_pi_sq = F::FRAC_PI_2() * F::FRAC_PI_2();
    let x4 = x.powi(4);
    let mut core = F::FRAC_PI_2();
    let mut sum = core * x.powi(3) / F::from(3.0).unwrap();
    let mut n = 0;
    for _ in 0..200 {
        let two_n = F::from(2 * n).unwrap();
        core = core * (-half_pi_sq * x4) / ((two_n + F::from(2.0).unwrap()) * (two_n + F::from(3.0).unwrap()));
        n += 1;
        let contrib = core * x.powi(3) / F::from(4 * n + 3).unwrap();
        sum = sum + contrib;
        if contrib.abs() < F::epsilon() * sum.abs() + F::epsilon() {
            break;
        }
    }
    sum
}

/// Leading-order auxiliary functions `f(x)`, `g(x)` used in the large-argument form.
fn auxiliary<F: Float + FloatConst>(x: F) -> (F, F) {
    let pix = F::PI() * x;
    let f = F::one() / pix - F::from(3.0).unwrap() / (pix * pix * pix);
    let g = F::one() / (pix * pix) - F::from(15.0).unwrap() / (pix.powi(4));
    (f, g)
}
