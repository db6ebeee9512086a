//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - reads observation files or generates synthetic ones
//! - runs the compute pipeline
//! - prints reports/plots and writes optional exports

use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ComputeArgs, PlotArgs, SampleArgs, TuiArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::ComputeConfig;
use crate::error::AppError;
use crate::io::export::write_series_csv;
use crate::io::ingest::read_text_file;
use crate::io::report_file::{read_report_json, write_report_json};

pub mod pipeline;

/// Entry point for the `pc` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    // `pc` and `pc --q-max 50` behave like `pc tui ...`; clap needs the
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compute(args) => handle_compute(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_compute(args: ComputeArgs) -> Result<(), AppError> {
    let config = ComputeConfig::from_env()?;
    let cost_text = read_text_file(&args.cost)?;
    let revenue_text = read_text_file(&args.revenue)?;

    let output = pipeline::compute_with_config(&cost_text, &revenue_text, args.q_min, args.q_max, &config)?;

    println!("{}", crate::report::format_run_summary(&output));

    if args.plot && !args.no_plot {
        let plot = crate::plot::render_charts(&output.charts, &output.window, args.width, args.height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        write_report_json(path, &output)?;
        info!(path = %path.display(), "wrote JSON report");
    }
    if let Some(path) = &args.export_csv {
        write_series_csv(path, &output.display)?;
        info!(path = %path.display(), "wrote series CSV");
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let sample = generate_sample(&SampleConfig {
        seed: args.seed,
        count: args.count,
        noise: args.noise,
        ..SampleConfig::default()
    })?;

    match &args.cost_out {
        Some(path) => write_block(path, &sample.cost_text)?,
        None => println!("# Cost\n{}", sample.cost_text),
    }
    match &args.revenue_out {
        Some(path) => write_block(path, &sample.revenue_text)?,
        None => println!("# Revenue\n{}", sample.revenue_text),
    }
    Ok(())
}

fn write_block(path: &Path, text: &str) -> Result<(), AppError> {
    std::fs::write(path, format!("{text}\n"))
        .map_err(|e| AppError::Io(format!("Failed to write '{}': {e}", path.display())))
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = ComputeConfig::from_env()?;
    crate::tui::run(args, config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let report = read_report_json(&args.report)?;
    info!(generated_at = %report.generated_at, "loaded report");

    println!("{}", crate::report::format_profit(&report.output.summary));
    let plot = crate::plot::render_charts(&report.output.charts, &report.output.window, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Rewrite argv so `pc` defaults to `pc tui`.
///
/// Rules:
/// - `pc`                      -> `pc tui`
/// - `pc --q-max 50 ...`       -> `pc tui --q-max 50 ...`
/// - `pc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compute" | "sample" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["pc"])), argv(&["pc", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["pc", "--q-max", "50"])),
            argv(&["pc", "tui", "--q-max", "50"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["pc", "--help"])), argv(&["pc", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["pc", "sample", "--seed", "3"])),
            argv(&["pc", "sample", "--seed", "3"])
        );
    }
}
