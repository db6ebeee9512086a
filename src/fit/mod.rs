//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - guard against under-determined fits
//! - run Levenberg–Marquardt per model family from a fixed initial guess
//! - translate solver failures into `FitError`

pub mod fitter;

pub use fitter::*;
