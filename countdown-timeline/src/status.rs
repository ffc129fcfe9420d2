//! Status text for the hovered point

use crate::hover::HoverPoint;
use crate::time_domain::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_YEAR, Timestamp};

/// Human-readable duration such as `1y 2d 3h 4m 5s`.
///
/// Whole seconds only; spans under a second are shown in milliseconds.
/// `compact` keeps only the leading unit.
pub fn format_duration(seconds: f64, compact: bool) -> String {
    if !seconds.is_finite() {
        return "0ms".to_string();
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    let seconds = seconds.abs();
    if seconds < 1.0 {
        return format!("{sign}{}ms", (seconds * 1000.0).round() as u64);
    }

    let mut remaining = seconds.floor();
    let mut parts = Vec::new();
    for (unit, suffix) in [
        (SECONDS_PER_YEAR, "y"),
        (SECONDS_PER_DAY, "d"),
        (SECONDS_PER_HOUR, "h"),
        (SECONDS_PER_MINUTE, "m"),
        (1.0, "s"),
    ] {
        let count = (remaining / unit).floor();
        remaining -= count * unit;
        if count > 0.0 {
            parts.push(format!("{}{}", count as u64, suffix));
        }
    }

    if compact {
        parts.truncate(1);
    }
    format!("{sign}{}", parts.join(" "))
}

/// `locked for … with … left on <date>[ at <time>]` for the hovered point.
///
/// Dates are rendered in UTC. `None` when the hover date cannot be
/// represented as a calendar date.
pub fn status_line(first_event: Timestamp, hover: &HoverPoint, show_details: bool) -> Option<String> {
    let datetime = hover.date.to_datetime()?;
    let compact = !show_details;
    let mut line = format!(
        "locked for {} with {} left on {}",
        format_duration(hover.date - first_event, compact),
        format_duration(hover.time, compact),
        datetime.format("%B %d, %Y")
    );
    if show_details {
        line.push_str(&format!(" at {}", datetime.format("%I:%M %p")));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_every_unit() {
        let seconds = SECONDS_PER_YEAR + 2.0 * SECONDS_PER_DAY + 3.0 * SECONDS_PER_HOUR + 4.0 * 60.0 + 5.0;
        assert_eq!(format_duration(seconds, false), "1y 2d 3h 4m 5s");
        assert_eq!(format_duration(seconds, true), "1y");
    }

    #[test]
    fn skips_zero_units_and_drops_fraction() {
        assert_eq!(format_duration(3_600.0 + 0.9, false), "1h");
        assert_eq!(format_duration(90.0, false), "1m 30s");
    }

    #[test]
    fn sub_second_spans_use_milliseconds() {
        assert_eq!(format_duration(0.0, false), "0ms");
        assert_eq!(format_duration(0.25, true), "250ms");
        assert_eq!(format_duration(-30.0, false), "-30s");
    }

    #[test]
    fn status_line_with_details() {
        // 2023-11-14T22:13:20Z
        let first = Timestamp(1_700_000_000.0);
        let hover = HoverPoint {
            date: first.add_seconds(2.0 * SECONDS_PER_DAY),
            time: 3.0 * SECONDS_PER_HOUR,
            x: 0.0,
            y: 0.0,
        };
        assert_eq!(
            status_line(first, &hover, true).unwrap(),
            "locked for 2d with 3h left on November 16, 2023 at 10:13 PM"
        );
    }

    #[test]
    fn status_line_compact() {
        let first = Timestamp(1_700_000_000.0);
        let hover = HoverPoint {
            date: first.add_seconds(SECONDS_PER_DAY + 5.0),
            time: 61.0,
            x: 0.0,
            y: 0.0,
        };
        assert_eq!(
            status_line(first, &hover, false).unwrap(),
            "locked for 1d with 1m left on November 15, 2023"
        );
    }
}
