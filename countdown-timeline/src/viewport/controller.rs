//! Viewport state machine for the vertical (date) axis
//!
//! The full date extent is drawn into `height × zoom_factor` pixels and the
//! visible window starts `pan_offset` seconds after the extent start. The
//! overview strip shows the whole extent in `height` pixels; gestures are
//! expressed in those overview pixels, like a brush over a minimap.

use super::scale::LinearScale;
use crate::config::ViewportConfig;
use crate::curve;
use crate::time_domain::{CurvePoint, DateExtent, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    /// Seconds from the extent start to the top of the visible window.
    pub pan_offset: f64,
    /// Screen pixels per overview pixel.
    pub zoom_factor: f64,
}

/// Vertical range selected on the overview strip, in overview pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushSelection {
    pub start: f64,
    pub end: f64,
}

impl BrushSelection {
    pub fn new(start: f64, end: f64) -> Self {
        BrushSelection { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    fn ordered(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            BrushSelection::new(self.end, self.start)
        }
    }
}

/// Mouse wheel tick; `modifier` is set while a zoom modifier key is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGesture {
    pub delta_y: f64,
    pub modifier: bool,
}

impl WheelGesture {
    pub fn pan(delta_y: f64) -> Self {
        WheelGesture { delta_y, modifier: false }
    }

    pub fn zoom(delta_y: f64) -> Self {
        WheelGesture { delta_y, modifier: true }
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    extent: DateExtent,
    height: f64,
    state: ViewportState,
    config: ViewportConfig,
}

impl ViewportController {
    pub fn new(extent: DateExtent, height: f64, config: &ViewportConfig) -> Self {
        ViewportController {
            extent,
            height,
            state: ViewportState {
                pan_offset: 0.0,
                zoom_factor: config.initial_zoom,
            },
            config: config.clone(),
        }
    }

    /// Controller over the curve's date extent (degenerate for an empty curve).
    pub fn for_curve(curve: &[CurvePoint], height: f64, config: &ViewportConfig) -> Self {
        let extent = curve::date_extent(curve).unwrap_or_default();
        Self::new(extent, height, config)
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn extent(&self) -> DateExtent {
        self.extent
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whole extent onto the overview strip.
    pub fn overview_scale(&self) -> LinearScale {
        LinearScale::new(self.extent_seconds(), (0.0, self.height))
    }

    /// Whole extent onto the zoomed chart, before the pan offset is applied.
    pub fn date_scale(&self) -> LinearScale {
        LinearScale::new(self.extent_seconds(), (0.0, self.height * self.state.zoom_factor))
    }

    pub fn domain_to_screen(&self, date: Timestamp) -> f64 {
        self.date_scale().apply(date.seconds() - self.state.pan_offset)
    }

    pub fn screen_to_domain(&self, y: f64) -> Timestamp {
        Timestamp(self.date_scale().invert(y) + self.state.pan_offset)
    }

    /// Dates shown between two screen rows.
    pub fn visible_window(&self, top: f64, bottom: f64) -> DateExtent {
        DateExtent::new(self.screen_to_domain(top), self.screen_to_domain(bottom))
    }

    /// Current selection on the overview strip.
    pub fn selection(&self) -> BrushSelection {
        let start = self.state.pan_offset * self.overview_scale().slope();
        BrushSelection::new(start, start + self.height / self.state.zoom_factor)
    }

    /// Brush-drag transition: the selection becomes the visible window.
    ///
    /// Returns `false` (state untouched) for selections shorter than
    /// `min_selection_px` or when the extent has no width.
    pub fn apply_brush(&mut self, selection: BrushSelection) -> bool {
        if self.extent.is_degenerate() {
            log::debug!("ignoring brush on degenerate extent {}", self.extent);
            return false;
        }

        let selection = selection.ordered();
        let start = selection.start.max(0.0).min(self.height);
        let end = selection.end.max(0.0).min(self.height);
        let length = end - start;
        if !(length >= self.config.min_selection_px && length > 0.0) {
            log::debug!("ignoring brush selection {:.2}..{:.2}", selection.start, selection.end);
            return false;
        }

        self.state = ViewportState {
            pan_offset: start / self.overview_scale().slope(),
            zoom_factor: self.height / length,
        };
        log::debug!(
            "brush {:.1}..{:.1}px -> pan {:.0}s, zoom {:.3}",
            start,
            end,
            self.state.pan_offset,
            self.state.zoom_factor
        );
        true
    }

    /// Wheel transition.
    ///
    /// A plain tick moves the selection by `delta_y / zoom_factor` overview
    /// pixels, kept inside the strip. With the modifier held the selection
    /// grows (positive delta) or shrinks by `wheel_zoom_step` from its start.
    pub fn apply_wheel(&mut self, wheel: WheelGesture) -> bool {
        if wheel.delta_y == 0.0 || !wheel.delta_y.is_finite() || self.extent.is_degenerate() {
            return false;
        }

        let current = self.selection();
        if wheel.modifier {
            let length = current.length() * (1.0 + self.config.wheel_zoom_step * wheel.delta_y.signum());
            let end = (current.start + length).min(self.height);
            self.apply_brush(BrushSelection::new(current.start, end))
        } else {
            let max_start = (self.height - current.length()).max(0.0);
            let start = (current.start + wheel.delta_y / self.state.zoom_factor).clamp(0.0, max_start);
            self.state.pan_offset = start / self.overview_scale().slope();
            log::trace!("wheel pan -> {:.0}s", self.state.pan_offset);
            true
        }
    }

    /// Vertical tick count, scaled with zoom so spacing stays readable.
    pub fn tick_count(&self, ticks_per_zoom: f64) -> usize {
        (ticks_per_zoom * self.state.zoom_factor).round().max(0.0) as usize
    }

    fn extent_seconds(&self) -> (f64, f64) {
        (self.extent.start.seconds(), self.extent.end.seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_domain::SECONDS_PER_DAY;

    const T0: f64 = 1_700_000_000.0;
    const HEIGHT: f64 = 500.0;

    fn controller() -> ViewportController {
        let extent = DateExtent::new(Timestamp(T0), Timestamp(T0 + 100.0 * SECONDS_PER_DAY));
        ViewportController::new(extent, HEIGHT, &ViewportConfig::default())
    }

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn starts_at_extent_start_with_initial_zoom() {
        let viewport = controller();
        assert_eq!(viewport.state().pan_offset, 0.0);
        assert_eq!(viewport.state().zoom_factor, 2.0);
        assert_eq!(viewport.domain_to_screen(Timestamp(T0)), 0.0);
        assert_eq!(viewport.selection(), BrushSelection::new(0.0, 250.0));
    }

    #[test]
    fn screen_mapping_round_trips() {
        let mut viewport = controller();
        viewport.apply_brush(BrushSelection::new(120.0, 170.0));
        for day in [0.0, 13.5, 42.0, 99.9] {
            let date = Timestamp(T0 + day * SECONDS_PER_DAY);
            let back = viewport.screen_to_domain(viewport.domain_to_screen(date));
            assert!(close(back.seconds(), date.seconds(), 1e-3), "{day}");
        }
    }

    #[test]
    fn brush_sets_pan_and_zoom() {
        let mut viewport = controller();
        assert!(viewport.apply_brush(BrushSelection::new(100.0, 200.0)));
        let state = viewport.state();
        assert_eq!(state.zoom_factor, 5.0);
        assert!(close(state.pan_offset, 20.0 * SECONDS_PER_DAY, 1e-6));
        assert!(close(viewport.domain_to_screen(Timestamp(T0 + 20.0 * SECONDS_PER_DAY)), 0.0, 1e-6));
        let window = viewport.visible_window(0.0, HEIGHT);
        assert!(close(window.end - window.start, 20.0 * SECONDS_PER_DAY, 1e-3));
    }

    #[test]
    fn reversed_brush_is_normalised() {
        let mut viewport = controller();
        viewport.apply_brush(BrushSelection::new(200.0, 100.0));
        assert_eq!(viewport.state().zoom_factor, 5.0);
    }

    #[test]
    fn tiny_brush_is_ignored() {
        let mut viewport = controller();
        let before = viewport.state();
        assert!(!viewport.apply_brush(BrushSelection::new(50.0, 50.5)));
        assert_eq!(viewport.state(), before);
    }

    #[test]
    fn wheel_pans_by_delta_over_zoom() {
        let mut viewport = controller();
        assert!(viewport.apply_wheel(WheelGesture::pan(100.0)));
        let selection = viewport.selection();
        assert!(close(selection.start, 50.0, 1e-9));
        assert!(close(selection.length(), 250.0, 1e-9));
    }

    #[test]
    fn wheel_pan_is_clamped_to_extent() {
        let mut viewport = controller();
        viewport.apply_wheel(WheelGesture::pan(10_000.0));
        assert!(close(viewport.selection().end, HEIGHT, 1e-9));
        viewport.apply_wheel(WheelGesture::pan(-10_000.0));
        assert!(close(viewport.selection().start, 0.0, 1e-9));
    }

    #[test]
    fn modifier_wheel_rescales_from_lower_bound() {
        let mut viewport = controller();
        viewport.apply_brush(BrushSelection::new(100.0, 200.0));
        assert!(viewport.apply_wheel(WheelGesture::zoom(3.0)));
        let grown = viewport.selection();
        assert!(close(grown.start, 100.0, 1e-9));
        assert!(close(grown.length(), 105.0, 1e-9));

        viewport.apply_wheel(WheelGesture::zoom(-3.0));
        assert!(close(viewport.selection().length(), 99.75, 1e-9));
    }

    #[test]
    fn modifier_wheel_stops_at_strip_end() {
        let mut viewport = controller();
        viewport.apply_brush(BrushSelection::new(300.0, 500.0));
        viewport.apply_wheel(WheelGesture::zoom(1.0));
        assert!(close(viewport.selection().end, HEIGHT, 1e-9));
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut viewport = controller();
        assert!(!viewport.apply_wheel(WheelGesture::pan(0.0)));
        assert!(!viewport.apply_wheel(WheelGesture::zoom(f64::NAN)));
    }

    #[test]
    fn degenerate_extent_keeps_finite_mapping() {
        let extent = DateExtent::new(Timestamp(T0), Timestamp(T0));
        let mut viewport = ViewportController::new(extent, HEIGHT, &ViewportConfig::default());
        assert!(!viewport.apply_brush(BrushSelection::new(0.0, 100.0)));
        let y = viewport.domain_to_screen(Timestamp(T0 + 5.0));
        assert!(y.is_finite());
        assert_eq!(viewport.screen_to_domain(y), Timestamp(T0 + 5.0));
    }

    #[test]
    fn tick_count_follows_zoom() {
        let mut viewport = controller();
        assert_eq!(viewport.tick_count(10.0), 20);
        viewport.apply_brush(BrushSelection::new(0.0, 100.0));
        assert_eq!(viewport.tick_count(10.0), 50);
    }
}
