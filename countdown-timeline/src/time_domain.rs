//! Time domain for the countdown timeline
//!
//! Absolute timestamps, the events that move the countdown, and the points of
//! the resulting curve. Timestamps are seconds since the Unix epoch so that
//! decay arithmetic (one second of wall time drains one second of countdown)
//! stays a plain subtraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

/// A point in time as (fractional) seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0.0);

    pub fn from_unix_seconds(seconds: f64) -> Self {
        Timestamp(seconds)
    }

    pub fn from_datetime<Tz: chrono::TimeZone>(datetime: DateTime<Tz>) -> Self {
        let whole = datetime.timestamp() as f64;
        let fraction = f64::from(datetime.timestamp_subsec_nanos()) / 1_000_000_000.0;
        Timestamp(whole + fraction)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Signed number of seconds from `earlier` to `self`.
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    pub fn add_seconds(self, seconds: f64) -> Timestamp {
        Timestamp(self.0 + seconds)
    }

    pub fn max(self, other: Timestamp) -> Timestamp {
        if other.0 > self.0 { other } else { self }
    }

    /// UTC calendar time, `None` when out of chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let whole = self.0.floor();
        let nanos = ((self.0 - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(whole as i64, nanos)
    }

    /// Mean of a set of timestamps, `None` for an empty set.
    pub fn mean<I>(timestamps: I) -> Option<Timestamp>
    where
        I: IntoIterator<Item = Timestamp>,
    {
        let (sum, count) = timestamps
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), t| (sum + t.0, count + 1));
        (count > 0).then(|| Timestamp(sum / count as f64))
    }
}

impl Sub for Timestamp {
    type Output = f64;

    fn sub(self, rhs: Timestamp) -> f64 {
        self.seconds_since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

/// One entry of the event log.
///
/// `time_delta` is added to the countdown at `date`; a `frozen` event does not
/// let the countdown drain between the previous point and its own date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(with = "event_date")]
    pub date: Timestamp,
    pub time_delta: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frozen: bool,
}

impl Event {
    pub fn new(date: Timestamp, time_delta: f64) -> Self {
        Event {
            date,
            time_delta,
            description: String::new(),
            frozen: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Zero-delta, non-frozen event that extends the curve up to `now`.
    pub(crate) fn now_sentinel(now: Timestamp) -> Self {
        Event::new(now, 0.0)
    }
}

/// One vertex of the countdown curve: seconds remaining at `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: Timestamp,
    pub time: f64,
}

impl CurvePoint {
    pub fn new(date: Timestamp, time: f64) -> Self {
        CurvePoint { date, time }
    }

    /// Remaining time in days, the unit of the horizontal axis.
    pub fn days_remaining(self) -> f64 {
        self.time / SECONDS_PER_DAY
    }
}

/// Closed date interval covered by a curve or a viewport window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DateExtent {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateExtent {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        if start.0 <= end.0 {
            DateExtent { start, end }
        } else {
            DateExtent { start: end, end: start }
        }
    }

    pub fn span(self) -> f64 {
        self.end - self.start
    }

    pub fn contains(self, date: Timestamp) -> bool {
        date.0 >= self.start.0 && date.0 <= self.end.0
    }

    /// True when start and end coincide or either is not finite.
    pub fn is_degenerate(self) -> bool {
        !(self.span() > 0.0 && self.span().is_finite())
    }
}

impl fmt::Display for DateExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// Event dates travel as RFC 3339 strings (RFC 2822 is accepted on input).
mod event_date {
    use super::Timestamp;
    use chrono::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        match date.to_datetime() {
            Some(datetime) => serializer.serialize_str(&datetime.to_rfc3339()),
            None => serializer.serialize_f64(date.seconds()),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .or_else(|_| DateTime::parse_from_rfc2822(&text))
            .map(Timestamp::from_datetime)
            .map_err(|error| D::Error::custom(format!("invalid event date '{text}': {error}")))
    }
}
