//! Chart descriptions for a run.
//!
//! These are render-agnostic: the ASCII plotter, the TUI and JSON consumers all
//! draw from the same `ChartSet`.

use crate::domain::{Chart, ChartSet, DisplayCurves, ObservationSet, ProfitSummary, Series};

/// Build the Cost Function, Profit Function and Revenue vs Cost charts.
///
/// `summary` should be the unrounded summary so markers sit on the curve.
pub fn build_charts(cost_obs: &ObservationSet, display: &DisplayCurves, summary: &ProfitSummary) -> ChartSet {
    let q = &display.quantity;
    let verticals: Vec<f64> = summary.break_evens.iter().map(|be| be.quantity).collect();

    let cost = Chart {
        title: "Cost Function".to_string(),
        x_label: "Quantity".to_string(),
        y_label: "Total Cost".to_string(),
        lines: vec![
            Series::from_columns("Linear Fit", q, &display.cost_linear),
            Series::from_columns("Quadratic Fit", q, &display.cost_quadratic),
        ],
        scatter: vec![Series::new("User Data", cost_obs.points())],
        verticals: Vec::new(),
    };

    let profit = Chart {
        title: "Profit Function".to_string(),
        x_label: "Quantity".to_string(),
        y_label: "Profit".to_string(),
        lines: vec![Series::from_columns("Profit", q, &display.profit)],
        scatter: vec![Series::new(
            format!(
                "Max Profit: ${:.2} at Q={:.0}",
                summary.max_profit, summary.quantity_at_max
            ),
            vec![(summary.quantity_at_max, summary.max_profit)],
        )],
        verticals: verticals.clone(),
    };

    let revenue_cost = Chart {
        title: "Revenue vs Cost".to_string(),
        x_label: "Quantity".to_string(),
        y_label: "Dollars".to_string(),
        lines: vec![
            Series::from_columns("Total Revenue", q, &display.revenue),
            Series::from_columns("Total Cost", q, &display.cost_quadratic),
        ],
        scatter: Vec::new(),
        verticals,
    };

    ChartSet {
        cost,
        profit,
        revenue_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BreakEven;

    #[test]
    fn charts_carry_series_and_break_evens() {
        let display = DisplayCurves {
            quantity: vec![0.0, 1.0, 2.0],
            price: vec![3.0, 2.0, 1.0],
            revenue: vec![0.0, 2.0, 2.0],
            cost_linear: vec![1.0, 1.5, 2.0],
            cost_quadratic: vec![1.0, 1.2, 2.5],
            profit: vec![-1.0, 0.8, -0.5],
        };
        let mut obs = ObservationSet::default();
        obs.push(1.0, 1.1);
        let summary = ProfitSummary {
            max_profit: 0.8,
            quantity_at_max: 1.0,
            break_evens: vec![BreakEven {
                quantity: 0.5,
                price: 2.5,
            }],
        };

        let charts = build_charts(&obs, &display, &summary);
        assert_eq!(charts.cost.lines.len(), 2);
        assert_eq!(charts.cost.scatter[0].points, vec![(1.0, 1.1)]);
        assert_eq!(charts.profit.lines[0].points[1], (1.0, 0.8));
        assert_eq!(charts.profit.verticals, vec![0.5]);
        assert_eq!(charts.revenue_cost.verticals, vec![0.5]);
        assert!(charts.profit.scatter[0].label.starts_with("Max Profit: $0.80"));
        assert_eq!(charts.iter().count(), 3);
    }
}
