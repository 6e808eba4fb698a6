use core::borrow::Borrow;
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};

/// Canonical identifier of one (method, endpoint) series.
///
/// This is the join key between the series registry and the per-bucket counts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(String);

impl SeriesKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SeriesKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for SeriesKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SeriesKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SeriesKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Derive the series key for a request: the method followed by the endpoint with every `/` removed.
///
/// `GET /compare/random` becomes `GETcomparerandom`. The mapping is not injective: `GET /ab` and
/// `GETa /b` both produce `GETab`, and callers share one series in that case.
#[must_use]
pub fn derive_key(method: &str, endpoint: &str) -> SeriesKey {
    let mut key = String::with_capacity(method.len() + endpoint.len());
    key.push_str(method);
    key.extend(endpoint.chars().filter(|&c| c != '/'));
    SeriesKey(key)
}

/// Human-readable label for a request series, e.g. `GET /compare/random`.
#[must_use]
pub fn derive_label(method: &str, endpoint: &str) -> String {
    format!("{method} {endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_strips_separators() {
        assert_eq!(derive_key("GET", "/compare/random").as_str(), "GETcomparerandom");
        assert_eq!(derive_key("POST", "/a").as_str(), "POSTa");
        assert_eq!(derive_key("GET", "/objects/").as_str(), "GETobjects");
    }

    #[test]
    fn test_derive_key_keeps_method_verbatim() {
        assert_eq!(derive_key("G/ET", "/x").as_str(), "G/ETx");
    }

    #[test]
    fn test_derive_key_empty_parts() {
        assert_eq!(derive_key("", "").as_str(), "");
        assert_eq!(derive_key("GET", "/").as_str(), "GET");
        assert_eq!(derive_key("", "/health").as_str(), "health");
    }

    #[test]
    fn test_derive_key_collision() {
        // Distinct requests can collapse onto one key.
        assert_eq!(derive_key("GET", "/ab"), derive_key("GETa", "/b"));
        assert_eq!(derive_key("GET", "/a/b"), derive_key("GET", "/ab"));
    }

    #[test]
    fn test_derive_label() {
        assert_eq!(derive_label("GET", "/compare/random"), "GET /compare/random");
        assert_eq!(derive_label("GETa", "/b"), "GETa /b");
    }

    #[test]
    fn test_key_serializes_as_string() {
        let key = derive_key("GET", "/objects");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"GETobjects\"");
        assert_eq!(key.to_string(), "GETobjects");
    }
}
