use super::common;
use crate::Result;
use crate::usage::{AggregationResult, TimeBucket};
use core::fmt::Write;
use owo_colors::{AnsiColors, OwoColorize};
use terminal_size::{Width, terminal_size};

/// Width reserved for hour labels such as `Wed 11 PM`.
const LABEL_WIDTH: usize = 9;

/// Bars never shrink below this, even on very narrow terminals.
const MIN_BAR_WIDTH: usize = 10;

const GLYPHS: [char; 5] = ['█', '▓', '▒', '░', '■'];
const PALETTE: [AnsiColors; 5] = [AnsiColors::Blue, AnsiColors::Green, AnsiColors::Yellow, AnsiColors::Magenta, AnsiColors::Cyan];

pub fn generate<W: Write>(result: &AggregationResult, use_colors: bool, writer: &mut W) -> Result<()> {
    generate_with_width(result, use_colors, get_terminal_width(), writer)
}

fn generate_with_width<W: Write>(result: &AggregationResult, use_colors: bool, width: usize, writer: &mut W) -> Result<()> {
    let title = match (result.buckets.first(), result.buckets.last()) {
        (Some(first), Some(last)) => format!(
            "Requests per hour, {} to {} (UTC)",
            common::format_hour_label(first.start),
            common::format_hour_label(last.start)
        ),
        _ => "Requests per hour (empty window)".to_string(),
    };
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }
    writeln!(writer)?;

    // Legend
    if result.registry.is_empty() {
        writeln!(writer, "  No endpoints recorded")?;
    } else {
        for descriptor in &result.registry {
            let swatch = paint(&segment(descriptor.color_slot, 1), descriptor.color_slot, use_colors);
            writeln!(writer, "  {swatch} {} ({})", descriptor.label, descriptor.key)?;
        }
    }
    writeln!(writer)?;

    let max_total = result.buckets.iter().map(TimeBucket::total).max().unwrap_or(0);
    let count_width = max_total.to_string().len();
    // "  " + label + " │" before the bar, " " + count after it
    let bar_width = width.saturating_sub(2 + LABEL_WIDTH + 2 + 1 + count_width).max(MIN_BAR_WIDTH);

    for bucket in &result.buckets {
        write!(writer, "  {:<width$} │", common::format_hour_label(bucket.start), width = LABEL_WIDTH)?;

        let total = bucket.total();
        if total > 0 {
            for descriptor in &result.registry {
                let cells = scale(bucket.count(descriptor.key.as_str()), max_total, bar_width);
                if cells > 0 {
                    write!(writer, "{}", paint(&segment(descriptor.color_slot, cells), descriptor.color_slot, use_colors))?;
                }
            }
            write!(writer, " {total}")?;
        }
        writeln!(writer)?;
    }

    let total = result.total_count();
    writeln!(writer)?;
    writeln!(writer, "Total: {total} {}", common::requests_noun(total))?;
    if result.dropped_events > 0 {
        writeln!(
            writer,
            "{} {} fell outside the window",
            result.dropped_events,
            common::requests_noun(result.dropped_events)
        )?;
    }

    Ok(())
}

/// Number of bar cells for `count`, proportional to the busiest bucket; any non-zero count gets one cell.
fn scale(count: u64, max_total: u64, bar_width: usize) -> usize {
    if count == 0 || max_total == 0 {
        return 0;
    }

    let width = u64::try_from(bar_width).unwrap_or(u64::MAX);
    let cells = count.saturating_mul(width) / max_total;
    usize::try_from(cells).unwrap_or(bar_width).max(1)
}

fn segment(color_slot: usize, cells: usize) -> String {
    GLYPHS[color_slot % GLYPHS.len()].to_string().repeat(cells)
}

fn paint(text: &str, color_slot: usize, use_colors: bool) -> String {
    if use_colors {
        text.color(PALETTE[color_slot % PALETTE.len()]).to_string()
    } else {
        text.to_string()
    }
}

fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{BucketWindow, UsageEvent, aggregate_window};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 13, 37, 0).unwrap()
    }

    fn sample() -> AggregationResult {
        let events = vec![
            UsageEvent::new("1", now().to_rfc3339(), "GET", "/a"),
            UsageEvent::new("2", now().to_rfc3339(), "GET", "/a"),
            UsageEvent::new("3", now().to_rfc3339(), "POST", "/a"),
            UsageEvent::new("4", (now() - TimeDelta::hours(1)).to_rfc3339(), "POST", "/a"),
            UsageEvent::new("5", (now() - TimeDelta::hours(40)).to_rfc3339(), "GET", "/old"),
        ];
        aggregate_window(&events, now(), BucketWindow { length: 3, lookback_hours: 2 }).unwrap()
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(0, 10, 20), 0);
        assert_eq!(scale(10, 10, 20), 20);
        assert_eq!(scale(5, 10, 20), 10);
        assert_eq!(scale(1, 1000, 20), 1);
        assert_eq!(scale(3, 0, 20), 0);
    }

    #[test]
    fn test_generate_without_colors() {
        let mut output = String::new();
        generate_with_width(&sample(), false, 40, &mut output).unwrap();

        let expected = "\
Requests per hour, Thu 11 AM to Thu 1 PM (UTC)

  █ GET /a (GETa)
  ▓ POST /a (POSTa)
  ▒ GET /old (GETold)

  Thu 11 AM │
  Thu 12 PM │▓▓▓▓▓▓▓▓ 1
  Thu 1 PM  │████████████████▓▓▓▓▓▓▓▓ 3

Total: 4 requests
1 request fell outside the window
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_with_colors_emits_ansi() {
        let mut output = String::new();
        generate_with_width(&sample(), true, 40, &mut output).unwrap();
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("GET /a"));
    }

    #[test]
    fn test_generate_empty() {
        let result = aggregate_window(&[], now(), BucketWindow { length: 2, lookback_hours: 1 }).unwrap();
        let mut output = String::new();
        generate_with_width(&result, false, 40, &mut output).unwrap();
        assert!(output.contains("No endpoints recorded"));
        assert!(output.contains("Total: 0 requests"));
        assert!(!output.contains("outside the window"));
    }

    #[test]
    fn test_generate_zero_length_window() {
        let result = aggregate_window(&[], now(), BucketWindow { length: 0, lookback_hours: 1 }).unwrap();
        let mut output = String::new();
        generate_with_width(&result, false, 40, &mut output).unwrap();
        assert!(output.starts_with("Requests per hour (empty window)"));
    }
}
