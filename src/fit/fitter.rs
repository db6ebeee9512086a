//! Fitting routines for a single model kind.
//!
//! Given:
//! - quantities `Q_i`
//! - observed values `y_i`
//! - a model family `f(Q; p)`
//!
//! we minimize `Σ (f(Q_i; p) - y_i)^2` with Levenberg–Marquardt, starting from
//! `models::initial_guess` (all ones), and report the parameters plus SSE/RMSE.
//!
//! Fits share no state; fitting the same data twice yields identical parameters.

use tracing::debug;

use crate::domain::{FitQuality, FittedModel, FittedModels, ModelKind, ObservationSet};
use crate::error::FitError;
use crate::math::{LmFailure, LmSettings, levenberg_marquardt};
use crate::models::{initial_guess, predict};

/// Fit one model family to a set of observations.
pub fn fit_model(model: ModelKind, obs: &ObservationSet, settings: &LmSettings) -> Result<FittedModel, FitError> {
    let n = obs.len();
    let k = model.param_len();
    if n < k {
        return Err(FitError::InsufficientData { model, n, k });
    }

    let residuals = |params: &[f64]| -> Vec<f64> {
        obs.iter()
            .map(|(q, y)| predict(model, q, params) - y)
            .collect()
    };

    let solved = levenberg_marquardt(residuals, &initial_guess(model), settings).map_err(|e| match e {
        LmFailure::NonFinite => FitError::NonFinite { model },
        LmFailure::IterationLimit => FitError::NotConverged {
            model,
            iterations: settings.max_iterations,
        },
    })?;

    let rmse = (solved.sse / n as f64).sqrt();
    debug!(
        model = model.display_name(),
        params = ?solved.params,
        sse = solved.sse,
        iterations = solved.iterations,
        "fit converged"
    );

    Ok(FittedModel {
        kind: model,
        params: solved.params,
        quality: FitQuality {
            sse: solved.sse,
            rmse,
            n,
            iterations: solved.iterations,
        },
    })
}

/// Fit the linear and quadratic cost models and the power-law price model.
pub fn fit_all(cost: &ObservationSet, price: &ObservationSet, settings: &LmSettings) -> Result<FittedModels, FitError> {
    Ok(FittedModels {
        linear_cost: fit_model(ModelKind::LinearCost, cost, settings)?,
        quadratic_cost: fit_model(ModelKind::QuadraticCost, cost, settings)?,
        price: fit_model(ModelKind::PowerLawPrice, price, settings)?,
    })
}
