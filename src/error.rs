//! Error types for the profit pipeline.
//!
//! Two failure families matter to the user and are kept distinct so the host can
//! word its message precisely:
//!
//! - [`ParseError`]: the submitted text (or a bound/setting) is malformed or empty
//! - [`FitError`]: the optimizer could not produce parameters for a model
//!
//! Everything else (non-finite simulation output, file I/O, terminal setup) is
//! folded into [`AppError`], which is what the binary reports and maps to an exit
//! code.

use thiserror::Error;

use crate::domain::ModelKind;

/// Malformed or missing user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{block} data is empty.")]
    EmptyInput { block: &'static str },

    #[error("{block} data, line {line}: '{content}': {reason}")]
    MalformedLine {
        block: &'static str,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Invalid quantity bounds: q_min={q_min}, q_max={q_max} (need 0 <= q_min < q_max).")]
    InvalidBounds { q_min: i64, q_max: i64 },

    #[error("Invalid setting {name}='{value}': {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure to fit a model to its observations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("{model} fit needs at least {k} observations, got {n}.")]
    InsufficientData { model: ModelKind, n: usize, k: usize },

    #[error("{model} fit did not converge within {iterations} iterations.")]
    NotConverged { model: ModelKind, iterations: usize },

    #[error("{model} model became non-finite during fitting.")]
    NonFinite { model: ModelKind },
}

/// Top-level error reported by the pipeline and the binary.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Computation failed: {0}")]
    Compute(String),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Terminal(String),
}

impl AppError {
    /// Process exit code for the `pc` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Parse(_) | AppError::Io(_) => 2,
            AppError::Fit(_) => 3,
            AppError::Compute(_) | AppError::Terminal(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_message_names_content() {
        let err = ParseError::MalformedLine {
            block: "Cost",
            line: 3,
            content: "4,abc".to_string(),
            reason: "invalid float literal".to_string(),
        };
        let msg = AppError::from(err).to_string();
        assert!(msg.contains("4,abc"), "message should carry the line: {msg}");
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn exit_codes_separate_parse_and_fit() {
        let parse = AppError::from(ParseError::EmptyInput { block: "Cost" });
        let fit = AppError::from(FitError::NotConverged {
            model: ModelKind::PowerLawPrice,
            iterations: 10,
        });
        assert_eq!(parse.exit_code(), 2);
        assert_eq!(fit.exit_code(), 3);
    }

    #[test]
    fn non_finite_message_covers_the_whole_fit() {
        let msg = FitError::NonFinite {
            model: ModelKind::PowerLawPrice,
        }
        .to_string();
        assert_eq!(msg, "Power-law price model became non-finite during fitting.");
    }
}
