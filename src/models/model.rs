//! Model evaluation for the linear / quadratic cost and power-law price families.
//!
//! Parameter vectors follow `ModelKind::param_names` order.

use crate::domain::{ModelKind, ZERO_QUANTITY_EPS};

/// Replace an exact zero quantity with [`ZERO_QUANTITY_EPS`].
pub fn safe_quantity(q: f64) -> f64 {
    if q == 0.0 { ZERO_QUANTITY_EPS } else { q }
}

/// Predict the model value at quantity `q`.
///
/// The power-law family evaluates at `safe_quantity(q)`.
///
/// # Panics
/// Panics if `params` is shorter than `model.param_len()`.
pub fn predict(model: ModelKind, q: f64, params: &[f64]) -> f64 {
    match model {
        ModelKind::LinearCost => params[0] * q + params[1],
        ModelKind::QuadraticCost => params[0] * q * q + params[1] * q + params[2],
        ModelKind::PowerLawPrice => params[0] * safe_quantity(q).powf(params[1]),
    }
}

/// Deterministic starting point for the optimizer: all ones.
pub fn initial_guess(model: ModelKind) -> Vec<f64> {
    vec![1.0; model.param_len()]
}
