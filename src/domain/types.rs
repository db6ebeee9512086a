//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and simulation
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::LmSettings;

/// Substitute for `Q = 0` wherever the power-law price model is evaluated.
///
/// `a·Q^b` is undefined at zero for negative `b`, so a zero quantity is replaced
/// by this value before evaluation.
pub const ZERO_QUANTITY_EPS: f64 = 1e-6;

/// Concrete model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// `m·Q + b`
    LinearCost,
    /// `a·Q² + b·Q + c`
    QuadraticCost,
    /// `a·Q^b`
    PowerLawPrice,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::LinearCost,
        ModelKind::QuadraticCost,
        ModelKind::PowerLawPrice,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::LinearCost => "Linear cost",
            ModelKind::QuadraticCost => "Quadratic cost",
            ModelKind::PowerLawPrice => "Power-law price",
        }
    }

    /// Number of free parameters.
    pub fn param_len(self) -> usize {
        match self {
            ModelKind::LinearCost => 2,
            ModelKind::QuadraticCost => 3,
            ModelKind::PowerLawPrice => 2,
        }
    }

    /// Parameter names in vector order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelKind::LinearCost => &["m", "b"],
            ModelKind::QuadraticCost => &["a", "b", "c"],
            ModelKind::PowerLawPrice => &["a", "b"],
        }
    }

    /// Closed-form expression, used in reports and chart legends.
    pub fn formula(self) -> &'static str {
        match self {
            ModelKind::LinearCost => "m*Q + b",
            ModelKind::QuadraticCost => "a*Q^2 + b*Q + c",
            ModelKind::PowerLawPrice => "a*Q^b",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Paired `(quantity, value)` observations, stored column-wise.
///
/// Both columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    pub quantities: Vec<f64>,
    pub values: Vec<f64>,
}

impl ObservationSet {
    pub fn push(&mut self, quantity: f64, value: f64) {
        self.quantities.push(quantity);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.quantities.iter().copied().zip(self.values.iter().copied())
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.iter().collect()
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
    /// Optimizer iterations used.
    pub iterations: usize,
}

/// A fitted model: family plus parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub kind: ModelKind,
    pub params: Vec<f64>,
    pub quality: FitQuality,
}

impl FittedModel {
    /// Evaluate the model at `q`.
    pub fn predict(&self, q: f64) -> f64 {
        crate::models::predict(self.kind, q, &self.params)
    }
}

/// The three fits produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModels {
    pub linear_cost: FittedModel,
    pub quadratic_cost: FittedModel,
    pub price: FittedModel,
}

/// Caller-supplied plotting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityWindow {
    pub q_min: i64,
    pub q_max: i64,
}

/// Revenue and cost sampled on the fixed break-even scan grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCurves {
    pub quantity: Vec<f64>,
    pub revenue: Vec<f64>,
    pub cost: Vec<f64>,
}

/// Index-aligned curves on the display grid `[0, q_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayCurves {
    pub quantity: Vec<f64>,
    pub price: Vec<f64>,
    pub revenue: Vec<f64>,
    pub cost_linear: Vec<f64>,
    pub cost_quadratic: Vec<f64>,
    pub profit: Vec<f64>,
}

impl DisplayCurves {
    pub fn len(&self) -> usize {
        self.quantity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_empty()
    }
}

/// A quantity where revenue and cost cross, with the demand price there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub quantity: f64,
    pub price: f64,
}

/// Profit headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitSummary {
    pub max_profit: f64,
    pub quantity_at_max: f64,
    pub break_evens: Vec<BreakEven>,
}

/// A named `(x, y)` series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Build a series from two index-aligned columns.
    pub fn from_columns(label: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(label, x.iter().copied().zip(y.iter().copied()).collect())
    }
}

/// Render-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Connected line series.
    pub lines: Vec<Series>,
    /// Unconnected scatter series (observations, highlighted points).
    pub scatter: Vec<Series>,
    /// Vertical guide lines at these x values.
    pub verticals: Vec<f64>,
}

/// The three charts of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub cost: Chart,
    pub profit: Chart,
    pub revenue_cost: Chart,
}

impl ChartSet {
    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        [&self.cost, &self.profit, &self.revenue_cost].into_iter()
    }
}

/// Everything one `compute` call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeOutput {
    pub window: QuantityWindow,
    pub cost_observations: ObservationSet,
    pub price_observations: ObservationSet,
    pub fits: FittedModels,
    pub display: DisplayCurves,
    /// Presentation-rounded: profit 2 dp, quantity 1 dp, break-even pairs 2 dp.
    pub summary: ProfitSummary,
    pub charts: ChartSet,
}

/// Grid and solver settings for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeConfig {
    /// Break-even scan grid lower bound.
    pub scan_min: f64,
    /// Break-even scan grid upper bound.
    pub scan_max: f64,
    pub scan_points: usize,
    /// Display grid resolution over `[0, q_max]`.
    pub display_points: usize,
    pub solver: LmSettings,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            scan_min: 1.0,
            scan_max: 2000.0,
            scan_points: 2000,
            display_points: 400,
            solver: LmSettings::default(),
        }
    }
}

/// A saved run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub output: ComputeOutput,
}
