//! Levenberg–Marquardt nonlinear least squares.
//!
//! We minimize `Σ r_i(x)^2` for a residual function `r` supplied by the caller.
//!
//! Implementation choices:
//! - The Jacobian is a forward finite-difference approximation, one extra residual
//!   evaluation per parameter.
//! - Each damped step solves the augmented least-squares problem
//!
//!   ```text
//!   minimize ‖J δ + r‖² + λ ‖D δ‖²
//!   ```
//!
//!   by stacking `[J; √λ D]` and reusing the SVD solve below. `D` is Marquardt's
//!   column scaling (column norms of `J`).
//! - Parameter counts are tiny (2–3) so SVD cost is irrelevant.
//! - Convergence follows the usual MINPACK-style tests: relative SSE reduction
//!   below `ftol`, or step length below `xtol` relative to `‖x‖`.

use nalgebra::{DMatrix, DVector};
use tracing::trace;

/// `sqrt(f64::EPSILON)`, the relative finite-difference step.
const FD_STEP: f64 = 1.490_116_119_384_765_6e-8;

const MIN_DAMPING: f64 = 1e-15;
const MAX_DAMPING: f64 = 1e16;
const SCALE_FLOOR: f64 = 1e-12;

/// Solver knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmSettings {
    /// Upper bound on outer (Jacobian) iterations.
    pub max_iterations: usize,
    /// Relative SSE reduction tolerance.
    pub ftol: f64,
    /// Relative step length tolerance.
    pub xtol: f64,
    /// Starting damping factor λ.
    pub initial_damping: f64,
}

impl Default for LmSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            initial_damping: 1e-3,
        }
    }
}

/// Converged solution.
#[derive(Debug, Clone, PartialEq)]
pub struct LmOutcome {
    pub params: Vec<f64>,
    pub sse: f64,
    pub iterations: usize,
}

/// Why the solver gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LmFailure {
    /// Residuals (or their finite differences) were NaN/inf at an accepted point.
    NonFinite,
    /// `max_iterations` exhausted before a convergence test passed.
    IterationLimit,
}

/// Minimize the squared norm of `residuals` starting from `x0`.
pub fn levenberg_marquardt<F>(residuals: F, x0: &[f64], settings: &LmSettings) -> Result<LmOutcome, LmFailure>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let mut x = DVector::from_column_slice(x0);
    let mut r = evaluate(&residuals, &x).ok_or(LmFailure::NonFinite)?;
    let mut sse = r.norm_squared();
    let mut damping = settings.initial_damping;

    for iteration in 1..=settings.max_iterations {
        if sse == 0.0 {
            return Ok(outcome(&x, sse, iteration - 1));
        }

        let jac = forward_difference_jacobian(&residuals, &x, &r).ok_or(LmFailure::NonFinite)?;
        let scale = DVector::from_iterator(
            jac.ncols(),
            jac.column_iter().map(|c| c.norm().max(SCALE_FLOOR)),
        );

        let mut accepted = false;
        while damping <= MAX_DAMPING {
            let Some(step) = damped_step(&jac, &r, &scale, damping) else {
                damping *= 10.0;
                continue;
            };
            let trial = &x + &step;
            let Some(r_trial) = evaluate(&residuals, &trial) else {
                damping *= 10.0;
                continue;
            };
            let sse_trial = r_trial.norm_squared();
            if sse_trial >= sse {
                damping *= 10.0;
                continue;
            }

            let small_reduction = sse - sse_trial <= settings.ftol * sse;
            let small_step = step.norm() <= settings.xtol * (x.norm() + settings.xtol);

            x = trial;
            r = r_trial;
            sse = sse_trial;
            damping = (damping / 10.0).max(MIN_DAMPING);
            trace!(iteration, sse, damping, "lm step accepted");

            if small_reduction || small_step {
                return Ok(outcome(&x, sse, iteration));
            }
            accepted = true;
            break;
        }

        // No damping level lowers the SSE: `x` is a minimum to working precision.
        if !accepted {
            return Ok(outcome(&x, sse, iteration));
        }
    }

    Err(LmFailure::IterationLimit)
}

fn outcome(x: &DVector<f64>, sse: f64, iterations: usize) -> LmOutcome {
    LmOutcome {
        params: x.iter().copied().collect(),
        sse,
        iterations,
    }
}

fn evaluate<F>(residuals: &F, x: &DVector<f64>) -> Option<DVector<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let r = DVector::from_vec(residuals(x.as_slice()));
    r.iter().all(|v| v.is_finite()).then_some(r)
}

fn forward_difference_jacobian<F>(residuals: &F, x: &DVector<f64>, r0: &DVector<f64>) -> Option<DMatrix<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let mut jac = DMatrix::<f64>::zeros(r0.len(), x.len());
    let mut probe = x.clone();

    for j in 0..x.len() {
        let h = FD_STEP * x[j].abs().max(1.0);
        probe[j] = x[j] + h;
        // Use the representable step, not the requested one.
        let h_actual = probe[j] - x[j];
        let r = evaluate(residuals, &probe)?;
        jac.set_column(j, &((r - r0) / h_actual));
        probe[j] = x[j];
    }

    Some(jac)
}

fn damped_step(
    jac: &DMatrix<f64>,
    r: &DVector<f64>,
    scale: &DVector<f64>,
    damping: f64,
) -> Option<DVector<f64>> {
    let (m, n) = jac.shape();
    let mut a = DMatrix::<f64>::zeros(m + n, n);
    a.view_mut((0, 0), (m, n)).copy_from(jac);
    let sqrt_damping = damping.sqrt();
    for j in 0..n {
        a[(m + j, j)] = sqrt_damping * scale[j];
    }

    let mut b = DVector::<f64>::zeros(m + n);
    b.rows_mut(0, m).copy_from(&(-r));

    solve_least_squares(a, &b)
}

/// Solve a (possibly tall) least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn minimizes_exponential_decay() {
        // y = 5 exp(-0.7 t), noiseless.
        let t: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = t.iter().map(|&t| 5.0 * (-0.7 * t).exp()).collect();
        let residuals = |p: &[f64]| -> Vec<f64> {
            t.iter()
                .zip(&y)
                .map(|(&ti, &yi)| p[0] * (p[1] * ti).exp() - yi)
                .collect()
        };

        let out = levenberg_marquardt(residuals, &[1.0, 0.0], &LmSettings::default()).unwrap();
        assert!((out.params[0] - 5.0).abs() < 1e-6, "{:?}", out.params);
        assert!((out.params[1] + 0.7).abs() < 1e-6, "{:?}", out.params);
        assert!(out.sse < 1e-12);
    }

    #[test]
    fn zero_residual_start_returns_immediately() {
        let out = levenberg_marquardt(|p: &[f64]| vec![p[0] - 1.0], &[1.0], &LmSettings::default()).unwrap();
        assert_eq!(out.iterations, 0);
        assert_eq!(out.params, vec![1.0]);
    }

    #[test]
    fn non_finite_start_is_reported() {
        let err = levenberg_marquardt(|_: &[f64]| vec![f64::NAN], &[1.0], &LmSettings::default()).unwrap_err();
        assert_eq!(err, LmFailure::NonFinite);
    }

    #[test]
    fn iteration_limit_is_reported() {
        // Minimum only at infinity: exp(-p) -> 0.
        let settings = LmSettings {
            max_iterations: 3,
            ..LmSettings::default()
        };
        let err = levenberg_marquardt(|p: &[f64]| vec![(-p[0]).exp()], &[0.0], &settings).unwrap_err();
        assert_eq!(err, LmFailure::IterationLimit);
    }
}
