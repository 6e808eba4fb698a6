use super::SeriesKey;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures that abort an aggregation; no partial result is produced.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// An event's `createdAt` could not be read as a point in time.
    #[error("usage event '{event_id}' has an unparseable timestamp '{value}'")]
    Parse {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A bucket count could not be incremented. Signals a bug upstream of the aggregator.
    #[error("count for series '{key}' in the bucket starting at {bucket_start} cannot be incremented past {count}")]
    InvariantViolation {
        key: SeriesKey,
        bucket_start: DateTime<Utc>,
        count: u64,
    },
}
