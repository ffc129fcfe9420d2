//! The countdown timeline: event log, derived curve and viewport state

use crate::clustering::NaturalBreaks;
use crate::config::TimelineConfig;
use crate::curve;
use crate::frame::TimelineFrame;
use crate::hover::ScreenPoint;
use crate::time_domain::{CurvePoint, Event, Timestamp};
use crate::viewport::{BrushSelection, ViewportController, WheelGesture};

/// Owns the viewport state; everything else is derived per frame.
#[derive(Debug, Clone)]
pub struct Timeline {
    events: Vec<Event>,
    curve: Vec<CurvePoint>,
    viewport: ViewportController,
    config: TimelineConfig,
}

impl Timeline {
    pub fn new(events: Vec<Event>, now: Timestamp, config: TimelineConfig) -> Self {
        let curve = curve::build_curve(&events, now);
        let viewport = ViewportController::for_curve(&curve, config.layout.height, &config.viewport);
        log::debug!(
            "timeline over {} events, {} curve points, extent {}",
            events.len(),
            curve.len(),
            viewport.extent()
        );
        Timeline {
            events,
            curve,
            viewport,
            config,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn curve(&self) -> &[CurvePoint] {
        &self.curve
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn apply_brush(&mut self, selection: BrushSelection) -> bool {
        self.viewport.apply_brush(selection)
    }

    pub fn apply_wheel(&mut self, wheel: WheelGesture) -> bool {
        self.viewport.apply_wheel(wheel)
    }

    pub fn frame(&self, pointer: Option<ScreenPoint>, breaks: &dyn NaturalBreaks) -> TimelineFrame {
        TimelineFrame::compose(&self.events, &self.curve, &self.viewport, pointer, &self.config, breaks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::JenksBreaks;
    use crate::time_domain::SECONDS_PER_DAY;

    const T0: f64 = 1_700_000_000.0;

    fn weekly_events(count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                Event::new(Timestamp(T0 + i as f64 * 7.0 * SECONDS_PER_DAY), 3.0 * SECONDS_PER_DAY)
                    .with_description(format!("week {i}"))
            })
            .collect()
    }

    #[test]
    fn empty_log_composes_empty_frame() {
        let timeline = Timeline::new(Vec::new(), Timestamp(T0), TimelineConfig::default());
        let frame = timeline.frame(Some(ScreenPoint::new(200.0, 200.0)), &JenksBreaks);
        assert!(frame.curve.is_empty());
        assert!(frame.clusters.is_empty());
        assert!(frame.annotations.is_empty());
        assert!(frame.hover.is_none());
        assert!(frame.status.is_none());
    }

    #[test]
    fn frame_reflects_brush() {
        let mut timeline = Timeline::new(weekly_events(10), Timestamp(T0 + 70.0 * SECONDS_PER_DAY), TimelineConfig::default());
        let before = timeline.frame(None, &JenksBreaks);
        assert!(timeline.apply_brush(BrushSelection::new(0.0, 80.0)));
        let after = timeline.frame(None, &JenksBreaks);
        assert_eq!(after.viewport.zoom_factor, 10.0);
        assert!(after.visible.span() < before.visible.span());
        assert!(after.clusters.len() <= before.clusters.len());
        assert_eq!(after.ticks.y, 100);
    }

    #[test]
    fn status_falls_back_to_present() {
        let timeline = Timeline::new(weekly_events(2), Timestamp(T0 + 8.0 * SECONDS_PER_DAY), TimelineConfig::default());
        let frame = timeline.frame(None, &JenksBreaks);
        let status = frame.status.unwrap();
        assert!(status.starts_with("locked for 8d with "), "{status}");
    }

    #[test]
    fn pointer_on_annotation_marks_it_hovered() {
        let mut timeline = Timeline::new(weekly_events(3), Timestamp(T0 + 14.0 * SECONDS_PER_DAY), TimelineConfig::default());
        timeline.apply_brush(BrushSelection::new(0.0, 800.0));
        let probe = timeline.frame(None, &JenksBreaks);
        assert_eq!(probe.annotations.len(), 2);
        let target = probe.annotations[1].anchor;
        let layout = &timeline.config().layout;
        let pointer = ScreenPoint::new(target.x + layout.margin_left, target.y + layout.margin_top);

        let frame = timeline.frame(Some(pointer), &JenksBreaks);
        let hovered = frame.hovered_cluster.unwrap();
        assert!(frame.annotations[hovered].hovered);
        assert!(frame.annotations.iter().filter(|a| a.expanded).count() == 1);
    }
}
