//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model families and fitted parameters (`ModelKind`, `FittedModel`)
//! - parsed observations (`ObservationSet`)
//! - simulation and summary outputs (`DisplayCurves`, `ProfitSummary`, `ChartSet`)

pub mod types;

pub use types::*;
