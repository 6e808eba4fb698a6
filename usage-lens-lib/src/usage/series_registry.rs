use super::SeriesKey;
use crate::HashMap;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Display metadata for one series.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDescriptor {
    pub key: SeriesKey,
    pub label: String,

    /// Zero-based position in first-seen order, used to pick a chart color.
    pub color_slot: usize,
}

impl SeriesDescriptor {
    /// The chart color token for this series, e.g. `hsl(var(--chart-1))` for slot 0.
    #[must_use]
    pub fn color(&self) -> String {
        format!("hsl(var(--chart-{}))", self.color_slot + 1)
    }
}

/// Append-only, insertion-ordered set of series descriptors.
///
/// Iteration order is first-registration order and drives legend and color ordering downstream.
#[derive(Debug, Clone, Default)]
pub struct SeriesRegistry {
    entries: Vec<SeriesDescriptor>,
    index: HashMap<SeriesKey, usize>,
}

impl SeriesRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the descriptor for `key`, creating it with the next color slot if it is new.
    ///
    /// Registering an existing key keeps its original label and slot.
    pub fn register(&mut self, key: SeriesKey, label: impl Into<String>) -> &SeriesDescriptor {
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.entries.push(SeriesDescriptor {
                    key: key.clone(),
                    label: label.into(),
                    color_slot: pos,
                });
                let _ = self.index.insert(key, pos);
                pos
            }
        };

        &self.entries[pos]
    }

    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&SeriesDescriptor> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesDescriptor> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.entries.iter().map(|d| &d.key)
    }

    /// A new registry holding only the descriptors accepted by `keep`, with their slots unchanged.
    #[must_use]
    pub fn retain_view(&self, mut keep: impl FnMut(&SeriesDescriptor) -> bool) -> Self {
        let entries: Vec<_> = self.entries.iter().filter(|d| keep(d)).cloned().collect();
        let index = entries.iter().enumerate().map(|(pos, d)| (d.key.clone(), pos)).collect();
        Self { entries, index }
    }
}

impl PartialEq for SeriesRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for SeriesRegistry {}

impl<'a> IntoIterator for &'a SeriesRegistry {
    type Item = &'a SeriesDescriptor;
    type IntoIter = core::slice::Iter<'a, SeriesDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for SeriesRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{derive_key, derive_label};

    fn register(registry: &mut SeriesRegistry, method: &str, endpoint: &str) -> SeriesDescriptor {
        registry.register(derive_key(method, endpoint), derive_label(method, endpoint)).clone()
    }

    #[test]
    fn test_register_assigns_sequential_slots() {
        let mut registry = SeriesRegistry::new();
        let a = register(&mut registry, "GET", "/a");
        let b = register(&mut registry, "POST", "/a");
        assert_eq!(a.color_slot, 0);
        assert_eq!(b.color_slot, 1);
        assert_eq!(b.label, "POST /a");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = SeriesRegistry::new();
        let first = register(&mut registry, "GET", "/a");
        let _ = register(&mut registry, "POST", "/a");
        let again = register(&mut registry, "GET", "/a");
        assert_eq!(first, again);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_collision_keeps_first_label() {
        let mut registry = SeriesRegistry::new();
        let _ = register(&mut registry, "GET", "/ab");
        let collided = register(&mut registry, "GETa", "/b");
        assert_eq!(collided.label, "GET /ab");
        assert_eq!(collided.color_slot, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut registry = SeriesRegistry::new();
        let _ = register(&mut registry, "GET", "/objects");
        assert_eq!(registry.lookup("GETobjects").map(|d| d.label.as_str()), Some("GET /objects"));
        assert!(registry.lookup("POSTobjects").is_none());
        assert!(registry.contains("GETobjects"));
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut registry = SeriesRegistry::new();
        for (method, endpoint) in [("PUT", "/z"), ("GET", "/a"), ("DELETE", "/m"), ("GET", "/a")] {
            let _ = register(&mut registry, method, endpoint);
        }
        let keys: Vec<_> = registry.keys().map(SeriesKey::as_str).collect();
        assert_eq!(keys, vec!["PUTz", "GETa", "DELETEm"]);
    }

    #[test]
    fn test_retain_view_keeps_slots() {
        let mut registry = SeriesRegistry::new();
        let _ = register(&mut registry, "GET", "/a");
        let _ = register(&mut registry, "POST", "/a");
        let view = registry.retain_view(|d| d.key.as_str() == "POSTa");
        assert_eq!(view.len(), 1);
        assert_eq!(view.lookup("POSTa").map(|d| d.color_slot), Some(1));
        assert!(view.lookup("GETa").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_color_token() {
        let mut registry = SeriesRegistry::new();
        let first = register(&mut registry, "GET", "/a");
        assert_eq!(first.color(), "hsl(var(--chart-1))");
    }

    #[test]
    fn test_serializes_as_ordered_list() {
        let mut registry = SeriesRegistry::new();
        let _ = register(&mut registry, "POST", "/b");
        let _ = register(&mut registry, "GET", "/a");
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json[0]["key"], "POSTb");
        assert_eq!(json[0]["colorSlot"], 0);
        assert_eq!(json[1]["label"], "GET /a");
    }
}
