//! Formatted terminal output for a run.

use crate::domain::{ComputeOutput, FittedModel, ProfitSummary};

/// Format the full run summary (inputs + fit diagnostics + profit headline).
pub fn format_run_summary(output: &ComputeOutput) -> String {
    let mut out = String::new();

    out.push_str("=== pc - Profit & Break-Even Analysis ===\n");
    out.push_str(&format!(
        "Observations: cost n={} | price n={}\n",
        output.cost_observations.len(),
        output.price_observations.len(),
    ));
    out.push_str(&format!(
        "Window: Q=[{}, {}] | display points={}\n",
        output.window.q_min,
        output.window.q_max,
        output.display.len(),
    ));

    out.push_str("\nModels:\n");
    for fit in [&output.fits.linear_cost, &output.fits.quadratic_cost, &output.fits.price] {
        out.push_str(&format_fit(fit));
    }

    out.push('\n');
    out.push_str(&format_profit(&output.summary));
    out
}

/// Format the profit headline and the break-even table.
pub fn format_profit(summary: &ProfitSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Max profit: ${:.2} at Q={:.1}\n",
        summary.max_profit, summary.quantity_at_max
    ));

    if summary.break_evens.is_empty() {
        out.push_str("Break-even: none in scan range\n");
        return out;
    }

    out.push_str("Break-even points:\n");
    out.push_str(format!("{:>12} {:>12}\n", "quantity", "price").trim_end());
    out.push('\n');
    out.push_str(format!("{:->12} {:->12}\n", "", "").trim_end());
    out.push('\n');
    for be in &summary.break_evens {
        out.push_str(&format!("{:>12.2} {:>12.2}\n", be.quantity, be.price));
    }
    out
}

fn format_fit(fit: &FittedModel) -> String {
    let params: Vec<String> = fit
        .kind
        .param_names()
        .iter()
        .zip(&fit.params)
        .map(|(name, v)| format!("{name}={v:.6}"))
        .collect();
    format!(
        "  {:<16} {:<16} {} | SSE={:.4} RMSE={:.4} iters={}\n",
        fit.kind.display_name(),
        fit.kind.formula(),
        params.join(" "),
        fit.quality.sse,
        fit.quality.rmse,
        fit.quality.iterations,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BreakEven;

    #[test]
    fn profit_block_lists_break_evens() {
        let summary = ProfitSummary {
            max_profit: 31.5,
            quantity_at_max: 3.2,
            break_evens: vec![BreakEven {
                quantity: 6.0,
                price: 14.25,
            }],
        };
        let txt = format_profit(&summary);
        let expected = concat!(
            "Max profit: $31.50 at Q=3.2\n",
            "Break-even points:\n",
            "    quantity        price\n",
            "------------ ------------\n",
            "        6.00        14.25\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn profit_block_without_break_evens() {
        let summary = ProfitSummary {
            max_profit: -2.0,
            quantity_at_max: 0.0,
            break_evens: Vec::new(),
        };
        assert!(format_profit(&summary).contains("none in scan range"));
    }

    #[test]
    fn run_summary_mentions_every_model() {
        let output = crate::app::pipeline::compute("1,10\n2,15\n3,25\n4,40", "1,20\n2,18\n3,17\n4,16", 0, 10)
            .unwrap();
        let txt = format_run_summary(&output);
        assert!(txt.contains("Linear cost"));
        assert!(txt.contains("Quadratic cost"));
        assert!(txt.contains("Power-law price"));
        assert!(txt.contains("Max profit"));
    }
}
