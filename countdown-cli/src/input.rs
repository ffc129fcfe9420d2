use anyhow::{Context, Result, bail};
use base64::Engine;
use countdown_timeline::{BrushSelection, Event, ScreenPoint, TimelineConfig, Timestamp, WheelGesture};
use std::path::Path;

/// A gesture from the command line, replayed in the order it was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Brush(BrushSelection),
    Wheel(WheelGesture),
}

pub fn load_events(events_file: Option<&Path>, segment: Option<&str>) -> Result<Vec<Event>> {
    let events = match (events_file, segment) {
        (Some(path), _) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read events file: {}", path.display()))?;
            parse_events(&content).with_context(|| format!("Failed to parse events file: {}", path.display()))?
        }
        (None, Some(segment)) => decode_segment(segment)?,
        (None, None) => bail!("either --events or --segment is required"),
    };

    if events.windows(2).any(|pair| pair[1].date < pair[0].date) {
        log::warn!("events are not in chronological order; the curve follows input order");
    }
    log::info!("loaded {} events", events.len());
    Ok(events)
}

pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    serde_json::from_str(json).context("Invalid event list")
}

/// Decode the base64 JSON event array carried in a timeline URL.
pub fn decode_segment(segment: &str) -> Result<Vec<Event>> {
    let segment = segment.trim();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(segment)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')))
        .context("Failed to decode base64 segment")?;
    let json = String::from_utf8(decoded).context("Segment is not valid UTF-8")?;
    parse_events(&json)
}

pub fn load_config(path: Option<&Path>) -> Result<TimelineConfig> {
    match path {
        Some(path) => {
            let config = TimelineConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            log::info!("using config {}", path.display());
            Ok(config)
        }
        None => Ok(TimelineConfig::default()),
    }
}

/// Present time from `--now`, or the system clock.
pub fn parse_now(value: Option<&str>) -> Result<Timestamp> {
    match value {
        Some(value) => {
            let datetime = chrono::DateTime::parse_from_rfc3339(value)
                .with_context(|| format!("Invalid --now timestamp '{}'", value))?;
            Ok(Timestamp::from_datetime(datetime))
        }
        None => Ok(Timestamp::from_datetime(chrono::Utc::now())),
    }
}

/// `y0:y1` in overview pixels.
pub fn parse_brush(value: &str) -> Result<BrushSelection, String> {
    let (start, end) = split_pair(value)?;
    Ok(BrushSelection::new(parse_number(start)?, parse_number(end)?))
}

/// `dy` for a pan, `dy:mod` for a zoom.
pub fn parse_wheel(value: &str) -> Result<WheelGesture, String> {
    match value.split_once(':') {
        Some((delta, "mod")) => Ok(WheelGesture::zoom(parse_number(delta)?)),
        Some((_, flag)) => Err(format!("unknown wheel modifier '{}', expected 'mod'", flag)),
        None => Ok(WheelGesture::pan(parse_number(value)?)),
    }
}

/// `x:y` in chart pixels.
pub fn parse_pointer(value: &str) -> Result<ScreenPoint, String> {
    let (x, y) = split_pair(value)?;
    Ok(ScreenPoint::new(parse_number(x)?, parse_number(y)?))
}

/// Merge brush and wheel arguments back into command-line order.
pub fn interleave(
    brushes: Vec<BrushSelection>,
    brush_positions: impl IntoIterator<Item = usize>,
    wheels: Vec<WheelGesture>,
    wheel_positions: impl IntoIterator<Item = usize>,
) -> Vec<Gesture> {
    let mut gestures: Vec<(usize, Gesture)> = brush_positions
        .into_iter()
        .zip(brushes.into_iter().map(Gesture::Brush))
        .chain(wheel_positions.into_iter().zip(wheels.into_iter().map(Gesture::Wheel)))
        .collect();
    gestures.sort_by_key(|(position, _)| *position);
    gestures.into_iter().map(|(_, gesture)| gesture).collect()
}

fn split_pair(value: &str) -> Result<(&str, &str), String> {
    value
        .split_once(':')
        .ok_or_else(|| format!("expected 'a:b', got '{}'", value))
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number '{}': {}", value, e))
}
