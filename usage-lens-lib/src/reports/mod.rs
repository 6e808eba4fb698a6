//! Report generation for aggregated usage
//!
//! This module turns an [`AggregationResult`](crate::usage::AggregationResult), usually a
//! filtered view of one, into output a person or a charting front end can consume.
//!
//! # Implementation Model
//!
//! Three report generators are provided, each accessed through a `generate` function:
//! - **Console**: Legend plus a stacked bar per hour, with optional ANSI colors
//! - **CSV**: One row per bucket, one column per series, with proper escaping
//! - **JSON**: Series metadata and chart data points in the shape chart widgets expect
//!
//! All generators write to a `core::fmt::Write` so callers decide where the text goes.
//! Series are always emitted in registry order, which is the legend and color order.

mod common;
mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
