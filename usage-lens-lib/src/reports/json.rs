use super::common;
use crate::Result;
use crate::usage::AggregationResult;
use core::fmt::Write;
use ohno::bail;
use serde_json::json;

/// Field of each chart data point that holds the bucket start.
const TIMESTAMP_FIELD: &str = "timestamp";

/// Emit the chart-ready document: series metadata in legend order plus one data point per bucket.
///
/// Each data point carries its `timestamp` and one field per series key with a non-zero count.
///
/// # Errors
///
/// Fails when a visible series key is `timestamp`, since its counts would replace the bucket start.
#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(result: &AggregationResult, writer: &mut W) -> Result<()> {
    if let Some(descriptor) = result.registry.lookup(TIMESTAMP_FIELD) {
        bail!(
            "series '{}' ({}) collides with the '{}' field of the chart data",
            descriptor.key,
            descriptor.label,
            TIMESTAMP_FIELD
        );
    }

    let series: Vec<_> = result
        .registry
        .iter()
        .map(|descriptor| {
            json!({
                "key": descriptor.key,
                "label": descriptor.label,
                "colorSlot": descriptor.color_slot,
                "color": descriptor.color(),
            })
        })
        .collect();

    let mut chart_data = Vec::with_capacity(result.buckets.len());
    for bucket in &result.buckets {
        let mut point = serde_json::Map::new();
        point.insert(TIMESTAMP_FIELD.to_string(), json!(common::format_timestamp(bucket.start)));
        for (key, count) in &bucket.counts {
            point.insert(key.to_string(), json!(count));
        }
        chart_data.push(serde_json::Value::Object(point));
    }

    let output = json!({
        "series": series,
        "chartData": chart_data,
        "droppedEvents": result.dropped_events,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{BucketWindow, FilterState, SeriesKey, UsageEvent, aggregate_window, apply_filter};
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 13, 37, 0).unwrap()
    }

    fn sample() -> AggregationResult {
        let events = vec![
            UsageEvent::new("1", "2024-05-02T13:05:00Z", "POST", "/b"),
            UsageEvent::new("2", "2024-05-02T13:06:00Z", "GET", "/a"),
            UsageEvent::new("3", "2024-05-02T12:06:00Z", "GET", "/a"),
            UsageEvent::new("4", "2024-04-01T12:06:00Z", "GET", "/a"),
        ];
        aggregate_window(&events, now(), BucketWindow { length: 2, lookback_hours: 1 }).unwrap()
    }

    #[test]
    fn test_generate_document_shape() {
        let mut output = String::new();
        generate(&sample(), &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["series"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["series"][0]["key"], "POSTb");
        assert_eq!(parsed["series"][0]["colorSlot"], 0);
        assert_eq!(parsed["series"][0]["color"], "hsl(var(--chart-1))");
        assert_eq!(parsed["series"][1]["label"], "GET /a");

        let data = parsed["chartData"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["timestamp"], "2024-05-02T12:00:00Z");
        assert_eq!(data[0]["GETa"], 1);
        assert!(data[0].get("POSTb").is_none());
        assert_eq!(data[1]["POSTb"], 1);
        assert_eq!(data[1]["GETa"], 1);

        assert_eq!(parsed["droppedEvents"], 1);
    }

    #[test]
    fn test_generate_filtered_view() {
        let result = sample();
        let state: FilterState = [SeriesKey::from("GETa")].into_iter().collect();
        let view = apply_filter(&result, &state);

        let mut output = String::new();
        generate(&view, &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["series"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["series"][0]["colorSlot"], 1);
        assert!(parsed["chartData"][1].get("POSTb").is_none());
    }

    #[test]
    fn test_timestamp_series_is_rejected() {
        let events = vec![UsageEvent::new("1", "2024-05-02T13:05:00Z", "time", "/stamp")];
        let result = aggregate_window(&events, now(), BucketWindow { length: 2, lookback_hours: 1 }).unwrap();

        let mut output = String::new();
        let err = generate(&result, &mut output).unwrap_err();
        assert!(err.to_string().contains("time /stamp"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_timestamp_series_filtered_out_is_accepted() {
        let events = vec![
            UsageEvent::new("1", "2024-05-02T13:05:00Z", "time", "/stamp"),
            UsageEvent::new("2", "2024-05-02T13:06:00Z", "GET", "/a"),
        ];
        let result = aggregate_window(&events, now(), BucketWindow { length: 2, lookback_hours: 1 }).unwrap();
        let state: FilterState = [SeriesKey::from("GETa")].into_iter().collect();

        let mut output = String::new();
        generate(&apply_filter(&result, &state), &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["chartData"][1]["timestamp"], "2024-05-02T13:00:00Z");
        assert_eq!(parsed["chartData"][1]["GETa"], 1);
    }

    #[test]
    fn test_generate_pretty_formatting() {
        let mut output = String::new();
        generate(&sample(), &mut output).unwrap();
        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }
}
