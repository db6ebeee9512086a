//! Command-line parsing for the profit & break-even analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/simulation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pc", version, about = "Profit & break-even analyzer (fitted cost and demand curves)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit cost/price models, print the profit summary, and optionally plot/export.
    Compute(ComputeArgs),
    /// Generate noisy synthetic cost and revenue observations.
    Sample(SampleArgs),
    /// Plot a previously exported JSON report.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `pc compute`, but renders the charts
    /// in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Options for a single analysis run.
#[derive(Debug, Parser, Clone)]
pub struct ComputeArgs {
    /// Cost observations, one `quantity,total_cost` pair per line.
    #[arg(long, value_name = "FILE")]
    pub cost: PathBuf,

    /// Price observations, one `quantity,price` pair per line.
    #[arg(long, value_name = "FILE")]
    pub revenue: PathBuf,

    /// Lower edge of the chart window.
    #[arg(long, default_value_t = 0)]
    pub q_min: i64,

    /// Upper edge of the chart window (display grid runs 0..=q_max).
    #[arg(long, default_value_t = 100)]
    pub q_max: i64,

    /// Render ASCII charts in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the full report (fits, curves, summary, charts) to JSON.
    #[arg(long = "export-json", value_name = "FILE")]
    pub export_json: Option<PathBuf>,

    /// Export the display-grid series to CSV.
    #[arg(long = "export-csv", value_name = "FILE")]
    pub export_csv: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Observations per block.
    #[arg(short = 'n', long, default_value_t = 12)]
    pub count: usize,

    /// Multiplicative noise level (log-volatility).
    #[arg(long, default_value_t = 0.04)]
    pub noise: f64,

    /// Write the cost block here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub cost_out: Option<PathBuf>,

    /// Write the revenue block here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub revenue_out: Option<PathBuf>,
}

/// Options for plotting a saved report.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Report JSON file produced by `pc compute --export-json`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for the interactive TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Cost observations file (uses a synthetic sample when omitted).
    #[arg(long, value_name = "FILE", requires = "revenue")]
    pub cost: Option<PathBuf>,

    /// Price observations file (uses a synthetic sample when omitted).
    #[arg(long, value_name = "FILE", requires = "cost")]
    pub revenue: Option<PathBuf>,

    /// Initial upper edge of the chart window.
    #[arg(long, default_value_t = 100)]
    pub q_max: i64,

    /// Seed for the synthetic sample.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
