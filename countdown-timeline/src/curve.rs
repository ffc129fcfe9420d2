//! Countdown curve construction
//!
//! Turns the chronological event log into the piecewise-linear curve of
//! remaining time. Between events the countdown drains one second per second
//! (unless the next event is frozen); every event contributes a vertical step
//! made of a "before" and an "after" point at its own date.

use crate::time_domain::{CurvePoint, DateExtent, Event, Timestamp};

/// Build the countdown curve for `events`, extended up to `now`.
///
/// Events must already be in chronological order. The first event has no
/// predecessor, so its "before" point sits at zero. An empty log produces an
/// empty curve. When `now` lies before the last event the sentinel is pinned
/// to the last event's date so the curve never runs backwards.
pub fn build_curve(events: &[Event], now: Timestamp) -> Vec<CurvePoint> {
    let Some(last_event) = events.last() else {
        return Vec::new();
    };

    let sentinel = Event::now_sentinel(now.max(last_event.date));
    let mut points: Vec<CurvePoint> = Vec::with_capacity(events.len() * 3 + 3);

    for event in events.iter().chain(std::iter::once(&sentinel)) {
        let last_point = points.last().copied();

        let decayed = match last_point {
            None => 0.0,
            Some(point) if event.frozen => point.time,
            Some(point) => point.time - event.date.seconds_since(point.date),
        };

        if let Some(point) = last_point {
            if decayed < 0.0 && point.time > 0.0 {
                points.push(CurvePoint::new(point.date.add_seconds(point.time), 0.0));
            }
        }

        // The countdown rests at zero once drained; a later delta starts from there.
        let last_time = decayed.max(0.0);

        points.push(CurvePoint::new(event.date, last_time));
        points.push(CurvePoint::new(event.date, (last_time + event.time_delta).max(0.0)));
    }

    log::trace!("built countdown curve: {} events -> {} points", events.len(), points.len());
    points
}

/// Linear interpolation of `y` at `x` on the segment `(x0, y0)`-`(x1, y1)`.
///
/// A zero-width segment yields `y0` instead of a non-finite value.
pub fn interpolate(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    let width = x1 - x0;
    if width == 0.0 || !width.is_finite() {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / width
}

/// Remaining time on the curve at `date`.
///
/// Uses the first point strictly after `date` and its predecessor. Dates
/// before the first point or at/after the last one have no bracketing pair
/// and return `None`.
pub fn time_at(curve: &[CurvePoint], date: Timestamp) -> Option<f64> {
    let index = curve.iter().position(|point| point.date.0 > date.0)?;
    if index == 0 {
        return None;
    }
    let (before, after) = (curve[index - 1], curve[index]);
    Some(interpolate(
        date.seconds(),
        (before.date.seconds(), before.time),
        (after.date.seconds(), after.time),
    ))
}

/// Date extent of the curve, `None` for an empty curve.
pub fn date_extent(curve: &[CurvePoint]) -> Option<DateExtent> {
    let first = curve.first()?;
    let (start, end) = curve.iter().fold((first.date, first.date), |(lo, hi), point| {
        (
            if point.date.0 < lo.0 { point.date } else { lo },
            hi.max(point.date),
        )
    });
    Some(DateExtent::new(start, end))
}

/// Largest remaining time on the curve, in seconds.
pub fn max_time(curve: &[CurvePoint]) -> Option<f64> {
    curve.iter().map(|point| point.time).reduce(f64::max)
}
