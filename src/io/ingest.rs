//! Observation text ingest.
//!
//! Turns a raw block of `quantity,value` lines into an [`ObservationSet`].
//!
//! Rules:
//! - blank lines and surrounding whitespace are ignored
//! - fields are taken literally: no quoting or escaping
//! - every remaining line must hold exactly two numeric fields
//! - quantities must be finite and non-negative, values finite
//! - the first bad line aborts the whole block; the error carries its content
//!
//! No fitting logic here.

use std::fs;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::ObservationSet;
use crate::error::{AppError, ParseError};

/// Block label for cost observations (used in error messages).
pub const COST_BLOCK: &str = "Cost";
/// Block label for price (revenue) observations.
pub const REVENUE_BLOCK: &str = "Revenue";

/// Parse one text block of `quantity,value` lines.
pub fn parse_observations(block: &'static str, text: &str) -> Result<ObservationSet, ParseError> {
    let body = text.trim();
    if body.is_empty() {
        return Err(ParseError::EmptyInput { block });
    }
    // Keep reported line numbers relative to the untrimmed text.
    let line_offset = text[..text.len() - text.trim_start().len()].matches('\n').count();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut out = ObservationSet::default();
    for result in reader.records() {
        let record = result.map_err(|e| ParseError::MalformedLine {
            block,
            line: e.position().map(|p| p.line() as usize).unwrap_or(0) + line_offset,
            content: String::new(),
            reason: e.to_string(),
        })?;

        // Whitespace-only line; anything with a comma is validated below.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let line = record.position().map(|p| p.line() as usize).unwrap_or(0) + line_offset;
        let (quantity, value) = parse_record(&record).map_err(|reason| {
            let content = record.iter().collect::<Vec<_>>().join(",");
            warn!(block, line, %content, %reason, "rejected observation line");
            ParseError::MalformedLine {
                block,
                line,
                content,
                reason,
            }
        })?;
        out.push(quantity, value);
    }

    if out.is_empty() {
        return Err(ParseError::EmptyInput { block });
    }
    Ok(out)
}

/// Read a whole text file (observation blocks are small).
pub fn read_text_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| AppError::Io(format!("Failed to read '{}': {e}", path.display())))
}

fn parse_record(record: &StringRecord) -> Result<(f64, f64), String> {
    if record.len() != 2 {
        return Err(format!("expected 2 comma-separated fields, found {}", record.len()));
    }

    let quantity = parse_number(&record[0])?;
    let value = parse_number(&record[1])?;
    if quantity < 0.0 {
        return Err(format!("quantity {quantity} is negative"));
    }
    Ok((quantity, value))
}

fn parse_number(field: &str) -> Result<f64, String> {
    let v: f64 = field
        .parse()
        .map_err(|_| format!("'{field}' is not a number"))?;
    if !v.is_finite() {
        return Err(format!("'{field}' is not finite"));
    }
    Ok(v)
}
