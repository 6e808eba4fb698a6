//! Command-line interface and orchestration for usage-lens
//!
//! This module implements the CLI commands and coordinates the aggregation engine
//! and the report generators. It handles argument parsing, configuration
//! management, event loading and the high-level workflows.
//!
//! # Implementation Model
//!
//! The module is organized around four main commands:
//!
//! ## Commands
//!
//! - **chart**: Aggregate request-log events into the hourly window, apply the
//!   toggled series filter and generate console, CSV and JSON reports
//! - **series**: List every endpoint series found in the events, in legend order
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and value ranges
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The chart and series commands follow
//! the same pattern:
//!
//! 1. Parse arguments, set up logging and load configuration
//! 2. Read the events from a file or standard input
//! 3. Aggregate them with `usage::aggregate_window`
//! 4. Build a `FilterState` from the `--series` toggles
//! 5. Render the filtered view
//!
//! Configuration is a TOML file with the window settings (`window_length`,
//! `lookback_hours`). All output goes through the [`Host`] trait.

mod chart;
mod common;
mod config;
mod host;
mod init;
mod run;
mod series;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use chart::{ChartArgs, process_chart};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use series::{SeriesArgs, list_series};
pub use validate::{ValidateArgs, validate_config};
