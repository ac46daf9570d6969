//! Scalar special functions used by the Fresnel reconstruction kernel.
//!
//! Every function here is pure, generic over the floating-point scalar, and total: it
//! returns `NaN`/`±∞` on a degenerate input rather than panicking, matching the contract
//! the diffraction-correction core has always required of its math library (see
//! `original_source/rss_ringoccs/diffrec/src/__math_function_lambertw.c` and
//! `__math_function_resolution_inverse.c`, whose per-type `_Float`/`_Double`/`_Long_Double`
//! ladder collapses here into one generic implementation per function, in the spirit of
//! the teacher crate's `special::Bessel` trait).

mod bessel;
mod erf;
mod fresnel;
mod lambert;
mod sinc;

pub use bessel::{i0, j0};
pub use erf::{erf, erfc};
pub use fresnel::{fresnel_cos, fresnel_sin};
pub use lambert::{lambert_w, resolution_inverse};
pub use sinc::sinc;

use num_traits::{Float, FloatConst};

/// Convenience trait mirroring the teacher's `special::Bessel` method-call style
/// (`x.i0()`), extended to every special function this crate needs.
pub trait SpecialFunctions: Float + FloatConst {
    /// Modified Bessel function of the first kind, order 0.
    fn i0(self) -> Self {
        i0(self)
    }

    /// Bessel function of the first kind, order 0.
    fn j0(self) -> Self {
        j0(self)
    }

    /// Unnormalized Fresnel sine integral `S(x)`.
    fn fresnel_sin(self) -> Self {
        fresnel_sin(self)
    }

    /// Unnormalized Fresnel cosine integral `C(x)`.
    fn fresnel_cos(self) -> Self {
        fresnel_cos(self)
    }

    /// `sin(x)/x`, continuous at `x=0`.
    fn sinc(self) -> Self {
        sinc(self)
    }

    /// Error function.
    fn erf(self) -> Self {
        erf(self)
    }

    /// Complementary error function.
    fn erfc(self) -> Self {
        erfc(self)
    }

    /// Principal branch of the Lambert W function.
    fn lambert_w(self) -> Self {
        lambert_w(self)
    }

    /// Inverse of `y = x/(e^{-x}+x-1)`.
    fn resolution_inverse(self) -> Self {
        resolution_inverse(self)
    }
}

impl<F: Float + FloatConst> SpecialFunctions for F {}
