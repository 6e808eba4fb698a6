use super::SeriesKey;
use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of hourly buckets: the last 24 hours plus the current partial hour.
pub const DEFAULT_WINDOW_LENGTH: usize = 25;

/// Default distance between "now" and the first bucket.
pub const DEFAULT_LOOKBACK_HOURS: u32 = 24;

/// The shape of the observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketWindow {
    /// Number of hourly buckets produced.
    pub length: usize,

    /// How many hours before "now" the first bucket starts.
    pub lookback_hours: u32,
}

impl Default for BucketWindow {
    fn default() -> Self {
        Self {
            length: DEFAULT_WINDOW_LENGTH,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
        }
    }
}

/// One hour-wide slot of the window with its per-series counts.
///
/// Counts are sparse: a series that saw no requests in this hour has no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub start: DateTime<Utc>,
    pub counts: BTreeMap<SeriesKey, u64>,
}

impl TimeBucket {
    #[must_use]
    pub const fn empty(start: DateTime<Utc>) -> Self {
        Self {
            start,
            counts: BTreeMap::new(),
        }
    }

    /// Count for `key`, zero when absent.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Zero the minutes, seconds and sub-second part of `ts`.
#[must_use]
pub fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = TimeDelta::minutes(i64::from(ts.minute()))
        + TimeDelta::seconds(i64::from(ts.second()))
        + TimeDelta::nanoseconds(i64::from(ts.nanosecond()));

    // The start of the hour always lies inside chrono's range when `ts` does.
    ts - into_hour
}

/// Produce the empty bucket skeleton for the window ending around `now`.
#[must_use]
pub fn generate_buckets(now: DateTime<Utc>, window: BucketWindow) -> Vec<TimeBucket> {
    let window_start = truncate_to_hour(now - TimeDelta::hours(i64::from(window.lookback_hours)));

    let mut buckets = Vec::with_capacity(window.length);
    let mut start = window_start;
    for _ in 0..window.length {
        buckets.push(TimeBucket::empty(start));
        start += TimeDelta::hours(1);
    }

    buckets
}
