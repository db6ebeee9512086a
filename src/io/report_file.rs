//! Read/write report JSON files.
//!
//! A report is the portable representation of one run:
//! - fitted models + diagnostics
//! - parsed observations
//! - display-grid curves and chart descriptions
//! - rounded profit summary
//!
//! The schema is defined by `domain::ReportFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{ComputeOutput, ReportFile};
use crate::error::AppError;

/// Tool tag stored in every report.
pub const REPORT_TOOL: &str = "pc";

/// Wrap a run in a timestamped report.
pub fn build_report(output: &ComputeOutput) -> ReportFile {
    ReportFile {
        tool: REPORT_TOOL.to_string(),
        generated_at: Utc::now(),
        output: output.clone(),
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, output: &ComputeOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &build_report(output))
        .map_err(|e| AppError::Io(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Io(format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile = serde_json::from_reader(file)
        .map_err(|e| AppError::Io(format!("Invalid report JSON: {e}")))?;
    if report.tool != REPORT_TOOL {
        return Err(AppError::Io(format!(
            "Report was written by '{}', expected '{REPORT_TOOL}'.",
            report.tool
        )));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_survives_json() {
        let output = crate::app::pipeline::compute("1,10\n2,15\n3,25\n4,40", "1,20\n2,18\n3,17\n4,16", 0, 10)
            .unwrap();
        let json = serde_json::to_string(&build_report(&output)).unwrap();
        let back: ReportFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tool, REPORT_TOOL);
        assert_eq!(back.output.summary, output.summary);
        assert_eq!(back.output.fits.price.kind, output.fits.price.kind);
    }
}
