//! The floating-point scalar bound used throughout the reconstruction core.
//!
//! Every algorithm except `SimpleFft` works for any `Float + FloatConst` scalar. The
//! `SimpleFft` driver additionally needs `rustfft::FftNum`, which `rustfft` only
//! implements for `f32`/`f64` — so under the `std` feature (the only configuration where
//! `SimpleFft` is reachable) the bound tightens to match; without it, any `Float +
//! FloatConst` type still works for the other five algorithms. `Send + Sync` are carried
//! unconditionally so the `parallel` feature's `rayon` fan-out never needs a second bound.

use num_traits::{Float, FloatConst, NumAssign};

#[cfg(feature = "std")]
pub trait Scalar: Float + FloatConst + NumAssign + rustfft::FftNum + Send + Sync {}
#[cfg(feature = "std")]
impl<F: Float + FloatConst + NumAssign + rustfft::FftNum + Send + Sync> Scalar for F {}

#[cfg(not(feature = "std"))]
pub trait Scalar: Float + FloatConst + NumAssign + Send + Sync {}
#[cfg(not(feature = "std"))]
impl<F: Float + FloatConst + NumAssign + Send + Sync> Scalar for F {}
