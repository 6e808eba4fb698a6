use super::{AggregationResult, SeriesKey, SeriesRegistry, TimeBucket};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// The set of series a user has toggled on.
///
/// An empty state means "no filter selected", which shows every series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active: BTreeSet<SeriesKey>,
}

/// One entry of the series picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub key: SeriesKey,
    pub label: String,
    pub color_slot: usize,
    pub active: bool,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `key` between active and inactive, returning whether it is now active.
    pub fn toggle(&mut self, key: SeriesKey) -> bool {
        if self.active.remove(&key) {
            false
        } else {
            let _ = self.active.insert(key);
            true
        }
    }

    pub fn activate(&mut self, key: SeriesKey) {
        let _ = self.active.insert(key);
    }

    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.active.iter()
    }

    /// Every registered series as a picker option, in registry order.
    #[must_use]
    pub fn options(&self, registry: &SeriesRegistry) -> Vec<FilterOption> {
        registry
            .iter()
            .map(|d| FilterOption {
                key: d.key.clone(),
                label: d.label.clone(),
                color_slot: d.color_slot,
                active: self.is_active(d.key.as_str()),
            })
            .collect()
    }
}

impl FromIterator<SeriesKey> for FilterState {
    fn from_iter<I: IntoIterator<Item = SeriesKey>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// Derive the view of `result` restricted to the active series.
///
/// With no active series the input is returned as is. Otherwise both the registry and every bucket keep
/// only active keys; inactive keys are removed rather than zeroed. Bucket timestamps, bucket order and
/// color slots are preserved, and `result` itself is never modified.
#[must_use]
pub fn apply_filter<'a>(result: &'a AggregationResult, state: &FilterState) -> Cow<'a, AggregationResult> {
    if state.is_empty() {
        return Cow::Borrowed(result);
    }

    let registry = result.registry.retain_view(|d| state.is_active(d.key.as_str()));
    let buckets = result
        .buckets
        .iter()
        .map(|bucket| TimeBucket {
            start: bucket.start,
            counts: bucket
                .counts
                .iter()
                .filter(|(key, _)| state.is_active(key.as_str()))
                .map(|(key, &count)| (key.clone(), count))
                .collect(),
        })
        .collect();

    Cow::Owned(AggregationResult {
        buckets,
        registry,
        dropped_events: result.dropped_events,
    })
}
