//! Hourly, per-endpoint aggregation of API request logs
//!
//! This module turns a list of raw request-log events into a fixed-width, time-bucketed
//! count matrix suitable for charting, and derives filtered views of that matrix.
//!
//! # Implementation Model
//!
//! The pipeline is a pure, single-pass fold over an already-fetched event list:
//!
//! 1. [`generate_buckets`] lays out the empty window: `length` hourly buckets starting at
//!    `now - lookback_hours`, truncated to the hour.
//! 2. [`aggregate`] visits each [`UsageEvent`] in input order. It derives the event's
//!    [`SeriesKey`] via [`derive_key`], registers the series in the [`SeriesRegistry`] on
//!    first sight, then increments the count of the bucket whose start equals the event's
//!    hour. Events outside the window are not counted but their series stay registered.
//! 3. [`apply_filter`] restricts an [`AggregationResult`] to the series toggled on in a
//!    [`FilterState`], borrowing the input unchanged when nothing is toggled.
//!
//! Registry order is first-seen order across the input and assigns each series its color
//! slot, so a single ordered traversal per aggregation is required. Nothing is shared or
//! persisted between calls.

mod aggregation_error;
mod aggregator;
mod filter;
mod series_key;
mod series_registry;
mod time_bucket;
mod usage_event;

pub use aggregation_error::AggregationError;
pub use aggregator::{AggregationResult, aggregate, aggregate_window};
pub use filter::{FilterOption, FilterState, apply_filter};
pub use series_key::{SeriesKey, derive_key, derive_label};
pub use series_registry::{SeriesDescriptor, SeriesRegistry};
pub use time_bucket::{BucketWindow, DEFAULT_LOOKBACK_HOURS, DEFAULT_WINDOW_LENGTH, TimeBucket, generate_buckets, truncate_to_hour};
pub use usage_event::{UsageEvent, parse_timestamp};
