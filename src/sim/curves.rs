//! Derived revenue, cost and profit curves.
//!
//! Two grids are used:
//!
//! - the **scan grid** (`[scan_min, scan_max]`, default `[1, 2000]` × 2000) feeds
//!   break-even detection only, so crossings are found over the same reference
//!   range whatever window the user plots
//! - the **display grid** (`[0, q_max]`, default 400 points) feeds the charts and
//!   the max-profit summary
//!
//! Revenue is `P(Q̃) · Q̃` with `Q̃ = safe_quantity(Q)`, so `Q = 0` never reaches the
//! power law. Cost is always evaluated at the true `Q`.

use tracing::debug;

use crate::domain::{ComputeConfig, DisplayCurves, FittedModel, FittedModels, ScanCurves};
use crate::error::AppError;
use crate::math::linspace;
use crate::models::safe_quantity;

/// Total revenue at `q` for a fitted price model.
pub fn total_revenue(price: &FittedModel, q: f64) -> f64 {
    let q = safe_quantity(q);
    price.predict(q) * q
}

/// Revenue and quadratic cost on the fixed break-even scan grid.
pub fn scan_curves(
    quadratic_cost: &FittedModel,
    price: &FittedModel,
    config: &ComputeConfig,
) -> Result<ScanCurves, AppError> {
    let quantity = linspace(config.scan_min, config.scan_max, config.scan_points);
    let revenue: Vec<f64> = quantity.iter().map(|&q| total_revenue(price, q)).collect();
    let cost: Vec<f64> = quantity.iter().map(|&q| quadratic_cost.predict(q)).collect();

    ensure_finite("scan revenue", &revenue)?;
    ensure_finite("scan cost", &cost)?;

    Ok(ScanCurves {
        quantity,
        revenue,
        cost,
    })
}

/// All display series over `[0, q_max]`.
pub fn display_curves(fits: &FittedModels, q_max: f64, config: &ComputeConfig) -> Result<DisplayCurves, AppError> {
    let quantity = linspace(0.0, q_max, config.display_points);

    let price: Vec<f64> = quantity.iter().map(|&q| fits.price.predict(q)).collect();
    let revenue: Vec<f64> = quantity.iter().map(|&q| total_revenue(&fits.price, q)).collect();
    let cost_linear: Vec<f64> = quantity.iter().map(|&q| fits.linear_cost.predict(q)).collect();
    let cost_quadratic: Vec<f64> = quantity.iter().map(|&q| fits.quadratic_cost.predict(q)).collect();
    let profit: Vec<f64> = revenue
        .iter()
        .zip(&cost_quadratic)
        .map(|(tr, tc)| tr - tc)
        .collect();

    ensure_finite("price", &price)?;
    ensure_finite("revenue", &revenue)?;
    ensure_finite("linear cost", &cost_linear)?;
    ensure_finite("quadratic cost", &cost_quadratic)?;
    ensure_finite("profit", &profit)?;

    debug!(points = quantity.len(), q_max, "display curves simulated");

    Ok(DisplayCurves {
        quantity,
        price,
        revenue,
        cost_linear,
        cost_quadratic,
        profit,
    })
}

fn ensure_finite(name: &str, values: &[f64]) -> Result<(), AppError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(AppError::Compute(format!(
            "{name} is not finite at grid index {idx} ({})",
            values[idx]
        ))),
        None => Ok(()),
    }
}
