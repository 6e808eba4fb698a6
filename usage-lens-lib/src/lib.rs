#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for usage-lens
//!
//! This library consolidates all functionality for the usage-lens tool, which turns
//! API request logs into hourly, per-endpoint usage charts.
//!
//! # Module Organization
//!
//! - [`usage`]: The aggregation engine (buckets, series, registry, filtering)
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

pub mod usage;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
