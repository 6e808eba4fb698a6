use super::common;
use crate::Result;
use crate::usage::AggregationResult;
use core::fmt::Write;
use std::borrow::Cow;

/// Write one row per bucket and one column per visible series, in registry order.
///
/// A series with no requests in a bucket leaves its cell empty.
pub fn generate<W: Write>(result: &AggregationResult, writer: &mut W) -> Result<()> {
    write!(writer, "timestamp")?;
    for descriptor in &result.registry {
        write!(writer, ",{}", escape_csv(&descriptor.label))?;
    }
    writeln!(writer)?;

    for bucket in &result.buckets {
        write!(writer, "{}", common::format_timestamp(bucket.start))?;
        for descriptor in &result.registry {
            match bucket.counts.get(descriptor.key.as_str()) {
                Some(count) => write!(writer, ",{count}")?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
