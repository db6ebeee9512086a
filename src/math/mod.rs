//! Mathematical utilities: nonlinear least squares and grids.

pub mod grid;
pub mod lm;

pub use grid::*;
pub use lm::*;
