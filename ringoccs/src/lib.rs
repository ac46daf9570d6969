//! Fresnel-diffraction inversion engine for planetary ring radio occultations.
//!
//! Recovers the complex ring transmittance (and, from it, normal optical depth) from raw
//! diffracted intensity/phase measurements by numerically undoing Fresnel diffraction: for
//! every output radius, a window of neighboring diffraction-pattern samples is sized,
//! weighted, phase-corrected via a stationary-phase solve, and summed. See
//! [`reconstruct::reconstruct`] for the entry point.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod geometry;
pub mod planner;
pub mod reconstruct;
pub mod scalar;
pub mod solver;
pub mod special;
pub mod windows;

pub use reconstruct::{
    reconstruct, Algorithm, DiffractedInput, InterpOrder, ReconstructionConfig,
    ReconstructionResult, ReconstructionStatus,
};
