//! Pointer hit-testing against the curve and the cluster annotations
//!
//! Pointer positions arrive in chart coordinates and are shifted by the
//! layout margins into plot-local coordinates, the space in which the curve,
//! the hover marker and annotation anchors are all expressed.

use crate::config::LayoutConfig;
use crate::curve;
use crate::time_domain::{CurvePoint, SECONDS_PER_DAY, Timestamp};
use crate::viewport::{LinearScale, ViewportController};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }

    pub fn distance_squared(self, other: ScreenPoint) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx * dx + dy * dy
    }

    /// Chart coordinates to plot-local coordinates.
    pub fn to_plot(self, layout: &LayoutConfig) -> ScreenPoint {
        ScreenPoint::new(self.x - layout.margin_left, self.y - layout.margin_top)
    }
}

/// Point of the curve under the pointer, with its plot-local position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverPoint {
    pub date: Timestamp,
    /// Remaining time in seconds.
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

impl HoverPoint {
    pub fn position(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

pub struct HoverLocator<'a> {
    curve: &'a [CurvePoint],
    viewport: &'a ViewportController,
    time_scale: LinearScale,
    layout: &'a LayoutConfig,
}

impl<'a> HoverLocator<'a> {
    pub fn new(
        curve: &'a [CurvePoint],
        viewport: &'a ViewportController,
        time_scale: LinearScale,
        layout: &'a LayoutConfig,
    ) -> Self {
        HoverLocator {
            curve,
            viewport,
            time_scale,
            layout,
        }
    }

    /// Curve point at the pointer's date, `None` outside the curve.
    pub fn locate(&self, pointer: ScreenPoint) -> Option<HoverPoint> {
        let local = pointer.to_plot(self.layout);
        let date = self.viewport.screen_to_domain(local.y);
        let time = curve::time_at(self.curve, date)?;
        Some(HoverPoint {
            date,
            time,
            x: self.time_scale.apply(time / SECONDS_PER_DAY),
            y: self.viewport.domain_to_screen(date),
        })
    }

    /// Plot-local anchor of an annotation centred on `date`.
    ///
    /// Dates off the curve are anchored at zero remaining time.
    pub fn anchor(&self, date: Timestamp) -> ScreenPoint {
        let time = curve::time_at(self.curve, date).unwrap_or(0.0);
        ScreenPoint::new(
            self.time_scale.apply(time / SECONDS_PER_DAY),
            self.viewport.domain_to_screen(date),
        )
    }

    /// Index of the first anchor within `radius_squared` of the pointer.
    pub fn hovered(&self, pointer: ScreenPoint, anchors: &[ScreenPoint], radius_squared: f64) -> Option<usize> {
        let local = pointer.to_plot(self.layout);
        anchors
            .iter()
            .position(|anchor| local.distance_squared(*anchor) < radius_squared)
    }
}
