//! `profit-curves` library crate.
//!
//! Fits cost and demand curves to observations, simulates revenue and profit
//! over a quantity grid, and locates maximum profit and break-even points.
//!
//! The binary (`pc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the CLI and the TUI share one pipeline (`app::pipeline::compute`)

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sim;
pub mod tui;
