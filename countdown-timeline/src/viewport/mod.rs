//! Viewport: pan/zoom state, coordinate mapping and the chart's scales

pub mod controller;
pub mod scale;

pub use controller::{BrushSelection, ViewportController, ViewportState, WheelGesture};
pub use scale::LinearScale;

use crate::config::LayoutConfig;
use crate::time_domain::CurvePoint;
use serde::Serialize;

/// Horizontal scales of the chart, in days of remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScales {
    /// Main plot: `[min(0, min days), max days]` onto the plot width.
    pub plot: LinearScale,
    /// Overview strip: `[min days, max days]` onto the strip width.
    pub overview: LinearScale,
}

impl TimeScales {
    pub fn for_curve(curve: &[CurvePoint], layout: &LayoutConfig) -> Self {
        let (min_days, max_days) = curve
            .iter()
            .map(|point| point.days_remaining())
            .fold(None, |acc: Option<(f64, f64)>, days| match acc {
                None => Some((days, days)),
                Some((lo, hi)) => Some((lo.min(days), hi.max(days))),
            })
            .unwrap_or((0.0, 0.0));

        TimeScales {
            plot: LinearScale::new((min_days.min(0.0), max_days), (0.0, layout.plot_width())),
            overview: LinearScale::new((min_days, max_days), (0.0, layout.overview_width)),
        }
    }
}
