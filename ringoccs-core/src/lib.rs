//! Core library for ring-occultation diffraction reconstruction internals.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::format;

use core::{error, fmt};

pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised whilst validating reconstruction inputs or planning window widths.
///
/// This is an internal error type; `ringoccs::reconstruct` never lets it escape its
/// public boundary, converting every variant into a `ReconstructionStatus` instead.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Input arrays did not all share the common length `DiffractedInput` requires, or
    /// fell below the minimum of two samples.
    #[cfg(feature = "alloc")]
    ShapeMismatch {
        /// Which field failed the check.
        field: alloc::string::String,
        /// Explains the expected shape.
        reason: alloc::string::String,
    },
    /// Input arrays did not all share the common length `DiffractedInput` requires, or
    /// fell below the minimum of two samples.
    #[cfg(not(feature = "alloc"))]
    ShapeMismatch,
    /// `rho_km` was not strictly monotone with (approximately) uniform spacing.
    #[cfg(feature = "alloc")]
    NonMonotoneRadius {
        /// Explains how monotonicity failed.
        reason: alloc::string::String,
    },
    /// `rho_km` was not strictly monotone with (approximately) uniform spacing.
    #[cfg(not(feature = "alloc"))]
    NonMonotoneRadius,
    /// A physical quantity (`f_km`, `d_km`, `kd`, `b_rad`, ...) fell outside the range the
    /// geometry requires.
    #[cfg(feature = "alloc")]
    OutOfBounds {
        /// Which field failed the check.
        field: alloc::string::String,
        /// Explains the required bound.
        reason: alloc::string::String,
    },
    /// A physical quantity (`f_km`, `d_km`, `kd`, `b_rad`, ...) fell outside the range the
    /// geometry requires.
    #[cfg(not(feature = "alloc"))]
    OutOfBounds,
    /// A per-sample window would extend past the available data.
    WindowInfeasible,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                #[cfg(feature = "alloc")]
                Error::ShapeMismatch { field, reason } =>
                    format!("Shape mismatch on field = {} with reason = {}", field, reason),
                #[cfg(not(feature = "alloc"))]
                Error::ShapeMismatch =>
                    "Input arrays did not share a common shape. Details not shown without `alloc` feature.",
                #[cfg(feature = "alloc")]
                Error::NonMonotoneRadius { reason } =>
                    format!("rho_km is not strictly monotone: {}", reason),
                #[cfg(not(feature = "alloc"))]
                Error::NonMonotoneRadius =>
                    "rho_km is not strictly monotone. Details not shown without `alloc` feature.",
                #[cfg(feature = "alloc")]
                Error::OutOfBounds { field, reason } =>
                    format!("Field = {} out of bounds: {}", field, reason),
                #[cfg(not(feature = "alloc"))]
                Error::OutOfBounds =>
                    "A field was out of bounds. Details not shown without `alloc` feature.",
                #[cfg(feature = "alloc")]
                Error::WindowInfeasible =>
                    alloc::string::ToString::to_string("Requested window extends past the available data"),
                #[cfg(not(feature = "alloc"))]
                Error::WindowInfeasible => "Requested window extends past the available data",
            }
        )
    }
}

impl error::Error for Error {}

#[cfg(feature = "std")]
pub mod fft;
