//! Input/output helpers.
//!
//! - observation text ingest + validation (`ingest`)
//! - display-grid CSV export (`export`)
//! - report JSON read/write (`report_file`)

pub mod export;
pub mod ingest;
pub mod report_file;

pub use export::*;
pub use ingest::*;
pub use report_file::*;
