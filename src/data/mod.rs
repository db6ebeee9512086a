//! Input data sources beyond user-supplied text.

pub mod sample;

pub use sample::*;
