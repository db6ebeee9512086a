//! Shared "compute pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parse -> fit -> simulate -> break-even scan -> summarize -> charts
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Every call is self-contained: no state survives between invocations.

use tracing::info;

use crate::domain::{ComputeConfig, ComputeOutput, QuantityWindow};
use crate::error::{AppError, ParseError};
use crate::fit::fit_all;
use crate::io::ingest::{COST_BLOCK, REVENUE_BLOCK, parse_observations};
use crate::report::{build_charts, round_summary, summarize};
use crate::sim::{display_curves, find_break_even, scan_curves};

/// Run the full pipeline with default grid and solver settings.
pub fn compute(cost_text: &str, revenue_text: &str, q_min: i64, q_max: i64) -> Result<ComputeOutput, AppError> {
    compute_with_config(cost_text, revenue_text, q_min, q_max, &ComputeConfig::default())
}

/// Run the full pipeline with explicit settings.
pub fn compute_with_config(
    cost_text: &str,
    revenue_text: &str,
    q_min: i64,
    q_max: i64,
    config: &ComputeConfig,
) -> Result<ComputeOutput, AppError> {
    // 1) Parse.
    let window = validate_window(q_min, q_max)?;
    let cost_observations = parse_observations(COST_BLOCK, cost_text)?;
    let price_observations = parse_observations(REVENUE_BLOCK, revenue_text)?;
    info!(
        cost_n = cost_observations.len(),
        price_n = price_observations.len(),
        "parsed observations"
    );

    // 2) Fit.
    let fits = fit_all(&cost_observations, &price_observations, &config.solver)?;

    // 3) Simulate on both grids.
    let scan = scan_curves(&fits.quadratic_cost, &fits.price, config)?;
    let display = display_curves(&fits, q_max as f64, config)?;

    // 4) Break-even scan.
    let break_even_quantities = find_break_even(&scan.quantity, &scan.revenue, &scan.cost);
    info!(count = break_even_quantities.len(), "break-even scan complete");

    // 5) Summarize; charts use exact values, the returned summary is rounded.
    let exact = summarize(&display, &break_even_quantities, &fits.price)?;
    let charts = build_charts(&cost_observations, &display, &exact);

    Ok(ComputeOutput {
        window,
        cost_observations,
        price_observations,
        fits,
        display,
        summary: round_summary(&exact),
        charts,
    })
}

fn validate_window(q_min: i64, q_max: i64) -> Result<QuantityWindow, ParseError> {
    if q_min < 0 || q_max <= q_min {
        return Err(ParseError::InvalidBounds { q_min, q_max });
    }
    Ok(QuantityWindow { q_min, q_max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;

    const COST: &str = "1,10\n2,15\n3,25\n4,40";
    const REVENUE: &str = "1,20\n2,18\n3,17\n4,16";

    #[test]
    fn end_to_end_reference_scenario() {
        let out = compute(COST, REVENUE, 0, 10).unwrap();
        assert!(out.summary.max_profit.is_finite());
        assert!((0.0..=10.0).contains(&out.summary.quantity_at_max));
        assert_eq!(out.display.len(), 400);
        assert_eq!(out.display.quantity[399], 10.0);
        for be in &out.summary.break_evens {
            assert!(be.quantity >= 1.0 && be.quantity <= 2000.0);
            assert!(be.price.is_finite());
        }
    }

    #[test]
    fn reference_scenario_has_one_break_even_past_the_peak() {
        // Cost is exactly 2.5Q^2 - 2.5Q + 10; revenue ~ 20Q^0.85 is ahead at Q=1.
        let out = compute(COST, REVENUE, 0, 10).unwrap();
        assert_eq!(out.summary.break_evens.len(), 1);
        assert!(out.summary.break_evens[0].quantity > out.summary.quantity_at_max);
    }

    #[test]
    fn summary_is_rounded_for_presentation() {
        let out = compute(COST, REVENUE, 0, 10).unwrap();
        let s = &out.summary;
        assert_eq!(s.max_profit, crate::report::round_to(s.max_profit, 2));
        assert_eq!(s.quantity_at_max, crate::report::round_to(s.quantity_at_max, 1));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = compute(COST, REVENUE, 0, 10).unwrap();
        let b = compute(COST, REVENUE, 0, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_cost_is_a_parse_error() {
        let err = compute("", REVENUE, 0, 10).unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::EmptyInput { .. })), "{err:?}");
    }

    #[test]
    fn malformed_revenue_line_is_a_parse_error() {
        let err = compute(COST, "1,20\n2;18", 0, 10).unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::MalformedLine { .. })), "{err:?}");
        assert!(err.to_string().contains("2;18"));
    }

    #[test]
    fn single_cost_point_is_a_fit_error() {
        let err = compute("1,10", REVENUE, 0, 10).unwrap_err();
        assert!(matches!(err, AppError::Fit(FitError::InsufficientData { .. })), "{err:?}");
    }

    #[test]
    fn invalid_window_is_rejected() {
        assert!(matches!(
            compute(COST, REVENUE, 5, 5),
            Err(AppError::Parse(ParseError::InvalidBounds { .. }))
        ));
        assert!(compute(COST, REVENUE, -1, 10).is_err());
    }

    #[test]
    fn charts_follow_display_grid() {
        let out = compute(COST, REVENUE, 2, 8).unwrap();
        assert_eq!(out.window, QuantityWindow { q_min: 2, q_max: 8 });
        assert_eq!(out.charts.profit.lines[0].points.len(), out.display.len());
        assert_eq!(out.charts.cost.scatter[0].points.len(), 4);
        assert_eq!(
            out.charts.revenue_cost.verticals.len(),
            out.summary.break_evens.len()
        );
    }
}
