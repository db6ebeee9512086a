//! Cost and price model implementations.
//!
//! Models are implemented as small, pure functions so that fitting/simulation
//! code can stay generic.

pub mod model;

pub use model::*;
