use super::{AggregationError, BucketWindow, SeriesRegistry, TimeBucket, UsageEvent, derive_key, derive_label, generate_buckets, truncate_to_hour};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Buckets plus the series that were seen while filling them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Chronological, fixed-length bucket sequence.
    pub buckets: Vec<TimeBucket>,

    /// Every series encountered, in first-seen order.
    pub registry: SeriesRegistry,

    /// Events whose hour fell outside the window.
    pub dropped_events: u64,
}

impl AggregationResult {
    /// Sum of every count in every bucket.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(TimeBucket::total).sum()
    }

    #[must_use]
    pub fn window_start(&self) -> Option<DateTime<Utc>> {
        self.buckets.first().map(|b| b.start)
    }
}

/// Fold `events` into `buckets`, registering every series in `registry`.
///
/// Events are visited in input order, which fixes each series' color slot. An event whose hour has no
/// bucket is not counted, but its series is still registered. The input events are never modified.
///
/// `buckets` may arrive in any order; the result always holds them in chronological order.
///
/// # Errors
///
/// Returns [`AggregationError::Parse`] on the first unparseable timestamp, and
/// [`AggregationError::InvariantViolation`] if a count cannot be incremented.
pub fn aggregate(events: &[UsageEvent], mut buckets: Vec<TimeBucket>, mut registry: SeriesRegistry) -> Result<AggregationResult, AggregationError> {
    let mut dropped_events = 0;
    buckets.sort_by_key(|b| b.start);

    for event in events {
        let key = derive_key(&event.method, &event.endpoint);
        if !registry.contains(key.as_str()) {
            let descriptor = registry.register(key.clone(), derive_label(&event.method, &event.endpoint));
            log::trace!("registered series '{}' in slot {}", descriptor.key, descriptor.color_slot);
        }

        let timestamp = event.timestamp().map_err(|source| AggregationError::Parse {
            event_id: event.id.clone(),
            value: event.created_at.clone(),
            source,
        })?;
        let hour = truncate_to_hour(timestamp);

        let Ok(pos) = buckets.binary_search_by_key(&hour, |b| b.start) else {
            log::trace!("event '{}' at {timestamp} is outside the window", event.id);
            dropped_events += 1;
            continue;
        };

        let count = buckets[pos].counts.entry(key).or_insert(0);
        let Some(next) = count.checked_add(1) else {
            return Err(AggregationError::InvariantViolation {
                key: derive_key(&event.method, &event.endpoint),
                bucket_start: hour,
                count: *count,
            });
        };
        *count = next;
    }

    log::debug!(
        "aggregated {} event(s) into {} bucket(s) and {} series, {dropped_events} outside the window",
        events.len(),
        buckets.len(),
        registry.len()
    );

    Ok(AggregationResult {
        buckets,
        registry,
        dropped_events,
    })
}

/// Aggregate `events` over a freshly generated window ending around `now`.
///
/// # Errors
///
/// Same as [`aggregate`].
pub fn aggregate_window(events: &[UsageEvent], now: DateTime<Utc>, window: BucketWindow) -> Result<AggregationResult, AggregationError> {
    aggregate(events, generate_buckets(now, window), SeriesRegistry::new())
}
