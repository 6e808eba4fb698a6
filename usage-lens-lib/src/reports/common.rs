//! Common utilities shared across report generators.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a bucket start as a short axis label, e.g. `Wed 1 PM`.
pub fn format_hour_label(start: DateTime<Utc>) -> String {
    start.format("%a %-I %p").to_string()
}

/// Format a bucket start as a machine-readable timestamp, e.g. `2024-05-01T13:00:00Z`.
pub fn format_timestamp(start: DateTime<Utc>) -> String {
    start.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Pluralize `request` for a count.
pub const fn requests_noun(count: u64) -> &'static str {
    if count == 1 { "request" } else { "requests" }
}
