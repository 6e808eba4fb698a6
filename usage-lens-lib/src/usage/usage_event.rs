use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use serde::{Deserialize, Serialize};

/// Offset-less layouts accepted after RFC 3339 fails, interpreted as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One API request as recorded by the request log.
///
/// `created_at` is kept as the raw wire string; it is only interpreted during aggregation so that a
/// malformed timestamp fails the aggregation that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub id: String,
    pub created_at: String,
    pub endpoint: String,
    pub method: String,
}

impl UsageEvent {
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: impl Into<String>, method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
            endpoint: endpoint.into(),
            method: method.into(),
        }
    }

    /// Interpret `created_at` as a point in time.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.created_at)
    }
}

/// Parse an RFC 3339 timestamp, falling back to offset-less ISO-8601 read as UTC.
///
/// The error reported is the RFC 3339 one, since that is the format producers are expected to emit.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();
    let rfc_err = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or(rfc_err)
}
