//! Public data model for a single Fresnel-inversion reconstruction call.

pub mod driver;
#[cfg(feature = "std")]
pub mod fft_driver;
pub mod orchestrator;

pub use orchestrator::reconstruct;

use nalgebra::Complex;
use ndarray::Array1;
use num_traits::{Float, FloatConst};

use crate::windows::WindowFamily;

/// One uniformly-spaced slice of diffracted (raw, uncorrected) occultation data.
///
/// Immutable once constructed; `reconstruct` never mutates it.
#[derive(Debug, Clone)]
pub struct DiffractedInput<F> {
    /// Ring radius, km. Strictly monotone, uniformly spaced.
    pub rho_km: Array1<F>,
    /// Complex diffracted transmittance.
    pub t_in: Array1<Complex<F>>,
    /// Local Fresnel scale, km.
    pub f_km: Array1<F>,
    /// Ring-plane azimuth of the ray footprint, radians.
    pub phi_rad: Array1<F>,
    /// Wavenumber times observer-to-ring distance (`k*D`).
    pub kd: Array1<F>,
    /// Ring opening angle, radians.
    pub b_rad: Array1<F>,
    /// Observer-to-ring distance, km.
    pub d_km: Array1<F>,
    /// Radial velocity of the ring-intercept point, km/s. Unused by the core; carried
    /// through so callers can round-trip it into a derived-quantity table.
    pub rho_dot_kms: Option<Array1<F>>,
    /// Sky (carrier) frequency, Hz. Unused by the core except as a `bfac` input.
    pub f_sky_hz: Option<Array1<F>>,
}

impl<F: Float> DiffractedInput<F> {
    /// Constructs a new input slice, checking the invariants common to every
    /// reconstruction call: equal-length arrays, `N >= 2`, strictly monotone `rho_km`
    /// with (approximately) uniform spacing, and positive `f_km`/`d_km`/`kd`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rho_km: Array1<F>,
        t_in: Array1<Complex<F>>,
        f_km: Array1<F>,
        phi_rad: Array1<F>,
        kd: Array1<F>,
        b_rad: Array1<F>,
        d_km: Array1<F>,
        rho_dot_kms: Option<Array1<F>>,
        f_sky_hz: Option<Array1<F>>,
    ) -> ringoccs_core::Result<Self> {
        let n = rho_km.len();
        if n < 2
            || t_in.len() != n
            || f_km.len() != n
            || phi_rad.len() != n
            || kd.len() != n
            || b_rad.len() != n
            || d_km.len() != n
        {
            return Err(shape_mismatch("rho_km", "arrays must share one length N >= 2"));
        }

        let dx = rho_km[1] - rho_km[0];
        if dx == F::zero() {
            return Err(non_monotone_radius("must be strictly monotone"));
        }
        let tol = F::from(1e-9).unwrap() * dx.abs();
        for w in rho_km.windows(2) {
            let step = w[1] - w[0];
            if step * dx <= F::zero() || (step - dx).abs() > tol {
                return Err(non_monotone_radius("must be strictly monotone with uniform spacing"));
            }
        }

        if f_km.iter().any(|&v| v <= F::zero()) {
            return Err(out_of_bounds("f_km", "must be positive"));
        }
        if d_km.iter().any(|&v| v <= F::zero()) {
            return Err(out_of_bounds("d_km", "must be positive"));
        }
        if kd.iter().any(|&v| v <= F::zero()) {
            return Err(out_of_bounds("kd", "must be positive"));
        }
        let half_pi = F::from(core::f64::consts::FRAC_PI_2).unwrap();
        if b_rad.iter().any(|&v| v.abs() > half_pi) {
            return Err(out_of_bounds("b_rad", "must satisfy |b| <= pi/2"));
        }

        Ok(Self {
            rho_km,
            t_in,
            f_km,
            phi_rad,
            kd,
            b_rad,
            d_km,
            rho_dot_kms,
            f_sky_hz,
        })
    }

    /// Constant sample spacing `rho_km[1] - rho_km[0]`.
    pub fn dx(&self) -> F {
        self.rho_km[1] - self.rho_km[0]
    }
}

#[cfg(feature = "alloc")]
fn shape_mismatch(field: &str, reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::ShapeMismatch {
        field: alloc::string::String::from(field),
        reason: alloc::string::String::from(reason),
    }
}

#[cfg(not(feature = "alloc"))]
fn shape_mismatch(_field: &str, _reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::ShapeMismatch
}

#[cfg(feature = "alloc")]
fn non_monotone_radius(reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::NonMonotoneRadius {
        reason: alloc::string::String::from(reason),
    }
}

#[cfg(not(feature = "alloc"))]
fn non_monotone_radius(_reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::NonMonotoneRadius
}

#[cfg(feature = "alloc")]
fn out_of_bounds(field: &str, reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::OutOfBounds {
        field: alloc::string::String::from(field),
        reason: alloc::string::String::from(reason),
    }
}

#[cfg(not(feature = "alloc"))]
fn out_of_bounds(_field: &str, _reason: &str) -> ringoccs_core::Error {
    ringoccs_core::Error::OutOfBounds
}

/// Width-interpolation order for the planner's window-width lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpOrder {
    /// Evaluate the window width exactly at every output sample.
    Exact,
    /// Linear interpolation between pivots.
    Linear,
    /// Quadratic interpolation between pivots.
    Quadratic,
    /// Cubic interpolation between pivots.
    Cubic,
}

impl TryFrom<u8> for InterpOrder {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InterpOrder::Exact),
            2 => Ok(InterpOrder::Linear),
            3 => Ok(InterpOrder::Quadratic),
            4 => Ok(InterpOrder::Cubic),
            _ => Err(()),
        }
    }
}

/// Selects which reconstruction driver (`reconstruct::driver`) performs the per-output
/// convolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    /// Closed-form quadratic Fresnel approximation (no φ solver).
    Fresnel,
    /// Legendre/polynomial expansion of ψ truncated at `order` (`2..=256`).
    Legendre {
        /// Truncation order.
        order: u16,
    },
    /// Exact Newton-Raphson stationary-phase solve, circular geometry.
    Newton,
    /// Newton-Raphson with an additive perturbation polynomial on ψ.
    NewtonPerturbed,
    /// Newton-Raphson against a Keplerian ring-intercept ellipse.
    NewtonElliptical,
    /// FFT-based convolution (flat window, ignores per-sample stationary phase).
    SimpleFft,
}

impl TryFrom<i64> for Algorithm {
    type Error = ();

    /// Decodes the original `order` numeric code: `0` selects the Newton family (further
    /// disambiguated between plain/perturbed/elliptical by `orchestrator::select_algorithm`
    /// from `perturb`/`ecc`/`peri`), `1` selects `Fresnel`, and `2..=256` selects
    /// `Legendre { order }`. Does not decode `use_fft`; `SimpleFft` is selected by that
    /// separate boolean flag, matching the original's single-pass dispatch table.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Algorithm::Newton),
            1 => Ok(Algorithm::Fresnel),
            2..=256 => Ok(Algorithm::Legendre { order: value as u16 }),
            _ => Err(()),
        }
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Algorithm::try_from(value as i64)
    }
}

/// Inputs to the reconstruction core that never vary per output sample.
#[derive(Debug, Clone)]
pub struct ReconstructionConfig<F> {
    /// Requested radial resolution, km. Must be `> 2 * dx`.
    pub res: F,
    /// Window-function family used to taper the convolution kernel.
    pub window: WindowFamily<F>,
    /// Reconstruction driver to dispatch to.
    pub algorithm: Algorithm,
    /// Apply window-area normalization to each output sample.
    pub use_norm: bool,
    /// Apply the forward (re-diffraction) transform instead of the inverse.
    pub use_fwd: bool,
    /// Include the Allen b-factor in window-width allocation.
    pub bfac: bool,
    /// Allen deviation, used iff `bfac`.
    pub sigma: F,
    /// Additive polynomial coefficients on ψ's expansion (all zero => pure Newton).
    pub perturb: [F; 5],
    /// Ring-intercept ellipse eccentricity (used by `NewtonElliptical`).
    pub ecc: F,
    /// Ring-intercept ellipse pericenter azimuth, radians (used by `NewtonElliptical`).
    pub peri: F,
    /// Width-interpolation order for neighbor-field lookups, as the raw wire code
    /// (`{0,2,3,4}`). `reconstruct` decodes and validates this itself via
    /// `InterpOrder::try_from` in `check_keywords`, returning `BadInterp` for anything
    /// else — unlike `Algorithm`/`WindowFamily`, which callers decode themselves before
    /// the config is built, `interp` is carried raw so an invalid code is reachable as a
    /// `ReconstructionStatus` rather than rejected only at construction time.
    pub interp: u8,
    /// Inclusive ring-radius range of interest, km.
    pub range: (F, F),
}

/// Outcome status of a `reconstruct` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionStatus {
    /// Reconstruction completed; `t_out`/`w_km` are valid for `[0, n_used)`.
    Ok,
    /// An input argument failed validation.
    BadInput {
        /// Why the input was rejected.
        reason: &'static str,
    },
    /// The requested range, intersected with the available data, admits no window that
    /// fits inside the input slice.
    OutOfRange,
    /// `interp` was not one of `{Exact, Linear, Quadratic, Cubic}`.
    BadInterp,
    /// Output-buffer allocation failed.
    OutOfMemory,
}

/// Result of a single `reconstruct` call.
#[derive(Debug, Clone)]
pub struct ReconstructionResult<F> {
    /// Reconstructed complex transmittance, one entry per output sample.
    pub t_out: Array1<Complex<F>>,
    /// Window width used at each output sample, km.
    pub w_km: Array1<F>,
    /// Index into the input arrays of the first reconstructed sample.
    pub start: usize,
    /// Number of samples reconstructed.
    pub n_used: usize,
    /// Outcome status.
    pub status: ReconstructionStatus,
}

impl<F: Float + FloatConst> ReconstructionResult<F> {
    /// `|t_out|^2`, one entry per output sample.
    pub fn power(&self) -> Array1<F> {
        self.t_out.mapv(|t| t.norm_sqr())
    }

    /// `arg(t_out)`, one entry per output sample.
    pub fn phase(&self) -> Array1<F> {
        self.t_out.mapv(|t| t.arg())
    }

    /// Normal optical depth `-sin(|b|) * ln(|t_out|^2)`, given the `b_rad` slice of the
    /// input this result was reconstructed from (`input.b_rad[start..start+n_used]`).
    pub fn optical_depth(&self, b_rad: &Array1<F>) -> Array1<F> {
        let power = self.power();
        power
            .iter()
            .zip(b_rad.iter().skip(self.start).take(self.n_used))
            .map(|(&p, &b)| -b.abs().sin() * p.ln())
            .collect()
    }
}

