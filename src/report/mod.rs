//! Reporting utilities: profit summary, chart descriptions, and formatted terminal output.
//!
//! We keep summarizing/formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

pub mod charts;
pub mod format;

pub use charts::*;
pub use format::*;

use crate::domain::{BreakEven, DisplayCurves, FittedModel, ProfitSummary};
use crate::error::AppError;

/// Max profit, where it occurs, and the price at each break-even quantity.
///
/// The arg-max is the first index holding the maximum.
pub fn summarize(display: &DisplayCurves, break_even_quantities: &[f64], price: &FittedModel) -> Result<ProfitSummary, AppError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in display.profit.iter().enumerate() {
        match best {
            Some((_, max)) if p <= max => {}
            _ => best = Some((i, p)),
        }
    }
    let Some((idx, max_profit)) = best else {
        return Err(AppError::Compute("Profit curve is empty.".to_string()));
    };

    let break_evens = break_even_quantities
        .iter()
        .map(|&quantity| BreakEven {
            quantity,
            price: price.predict(quantity),
        })
        .collect();

    Ok(ProfitSummary {
        max_profit,
        quantity_at_max: display.quantity[idx],
        break_evens,
    })
}

/// Round for presentation: profit 2 dp, quantity 1 dp, break-even pairs 2 dp.
pub fn round_summary(summary: &ProfitSummary) -> ProfitSummary {
    ProfitSummary {
        max_profit: round_to(summary.max_profit, 2),
        quantity_at_max: round_to(summary.quantity_at_max, 1),
        break_evens: summary
            .break_evens
            .iter()
            .map(|be| BreakEven {
                quantity: round_to(be.quantity, 2),
                price: round_to(be.price, 2),
            })
            .collect(),
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, ModelKind};

    fn price_model() -> FittedModel {
        FittedModel {
            kind: ModelKind::PowerLawPrice,
            params: vec![10.0, -1.0],
            quality: FitQuality {
                sse: 0.0,
                rmse: 0.0,
                n: 2,
                iterations: 0,
            },
        }
    }

    fn display(profit: Vec<f64>) -> DisplayCurves {
        let n = profit.len();
        let quantity: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        DisplayCurves {
            quantity,
            price: vec![0.0; n],
            revenue: vec![0.0; n],
            cost_linear: vec![0.0; n],
            cost_quadratic: vec![0.0; n],
            profit,
        }
    }

    #[test]
    fn single_peak_is_reported_exactly() {
        let d = display(vec![-3.0, 1.0, 4.25, 2.0, -1.0]);
        let s = summarize(&d, &[], &price_model()).unwrap();
        assert_eq!(s.max_profit, 4.25);
        assert_eq!(s.quantity_at_max, 1.0);
        assert!(s.break_evens.is_empty());
    }

    #[test]
    fn ties_take_first_occurrence() {
        let d = display(vec![1.0, 7.0, 7.0, 2.0]);
        let s = summarize(&d, &[], &price_model()).unwrap();
        assert_eq!(s.quantity_at_max, 0.5);
    }

    #[test]
    fn break_even_prices_use_power_law() {
        let d = display(vec![0.0, 1.0]);
        let s = summarize(&d, &[2.0, 5.0], &price_model()).unwrap();
        assert_eq!(s.break_evens.len(), 2);
        assert!((s.break_evens[0].price - 5.0).abs() < 1e-12);
        assert!((s.break_evens[1].price - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_break_even_quantity_is_finite() {
        let d = display(vec![0.0, 1.0]);
        let s = summarize(&d, &[0.0], &price_model()).unwrap();
        assert!(s.break_evens[0].price.is_finite());
    }

    #[test]
    fn empty_profit_curve_is_an_error() {
        assert!(summarize(&display(Vec::new()), &[], &price_model()).is_err());
    }

    #[test]
    fn rounding_at_presentation_boundary() {
        let s = ProfitSummary {
            max_profit: 12.3456,
            quantity_at_max: 4.26,
            break_evens: vec![BreakEven {
                quantity: 7.0,
                price: 3.14159,
            }],
        };
        let r = round_summary(&s);
        assert_eq!(r.max_profit, 12.35);
        assert_eq!(r.quantity_at_max, 4.3);
        assert_eq!(r.break_evens[0].price, 3.14);
    }
}
