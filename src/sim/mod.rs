//! Simulation over quantity grids and break-even detection.
//!
//! - `curves`: revenue / cost / profit on the scan and display grids
//! - `break_even`: sign-change scan of revenue minus cost

pub mod break_even;
pub mod curves;

pub use break_even::*;
pub use curves::*;
