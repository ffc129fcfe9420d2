//! One recomputation cycle, packaged for the rendering layer

use crate::annotations::{Annotation, layout_annotations};
use crate::clustering::{self, Cluster, NaturalBreaks};
use crate::config::TimelineConfig;
use crate::hover::{HoverLocator, HoverPoint, ScreenPoint};
use crate::status;
use crate::time_domain::{CurvePoint, DateExtent, Event};
use crate::viewport::{BrushSelection, LinearScale, TimeScales, ViewportController, ViewportState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickCounts {
    pub x: usize,
    pub y: usize,
}

/// Everything the renderer needs to draw the chart once.
///
/// Positions of the curve, hover marker and annotations are plot-local; the
/// overview strip uses `overview_dates` and `time_scales.overview`.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineFrame {
    pub curve: Vec<CurvePoint>,
    pub viewport: ViewportState,
    pub extent: DateExtent,
    pub visible: DateExtent,
    pub time_scales: TimeScales,
    /// Dates onto the zoomed chart; subtract the pan offset before applying.
    pub dates: LinearScale,
    pub overview_dates: LinearScale,
    pub ticks: TickCounts,
    pub selection: BrushSelection,
    pub clusters: Vec<Cluster>,
    pub hovered_cluster: Option<usize>,
    pub annotations: Vec<Annotation>,
    pub hover: Option<HoverPoint>,
    pub status: Option<String>,
}

impl TimelineFrame {
    pub fn compose(
        events: &[Event],
        curve: &[CurvePoint],
        viewport: &ViewportController,
        pointer: Option<ScreenPoint>,
        config: &TimelineConfig,
        breaks: &dyn NaturalBreaks,
    ) -> Self {
        let layout = &config.layout;
        let time_scales = TimeScales::for_curve(curve, layout);
        let locator = HoverLocator::new(curve, viewport, time_scales.plot, layout);

        let visible = viewport.visible_window(-layout.margin_top, layout.height - layout.margin_top);
        let state = viewport.state();
        let clusters = clustering::cluster_visible(events, visible, state.zoom_factor, &config.clustering, breaks);

        let anchors: Vec<ScreenPoint> = clusters.iter().map(|c| locator.anchor(c.centroid)).collect();
        let hovered_cluster = pointer
            .and_then(|p| locator.hovered(p, &anchors, config.annotations.hit_radius_squared()));
        let annotations = layout_annotations(&clusters, &anchors, hovered_cluster, layout, &config.annotations);

        let hover = pointer.and_then(|p| locator.locate(p));
        let status = events.first().and_then(|first| {
            let shown = hover.or_else(|| latest_point(curve, &locator))?;
            status::status_line(first.date, &shown, config.annotations.show_details)
        });

        TimelineFrame {
            curve: curve.to_vec(),
            viewport: state,
            extent: viewport.extent(),
            visible,
            time_scales,
            dates: viewport.date_scale(),
            overview_dates: viewport.overview_scale(),
            ticks: TickCounts {
                x: config.axes.ticks_x,
                y: viewport.tick_count(config.axes.ticks_y_per_zoom),
            },
            selection: viewport.selection(),
            clusters,
            hovered_cluster,
            annotations,
            hover,
            status,
        }
    }
}

/// Status fallback without a hover point: the present end of the curve.
fn latest_point(curve: &[CurvePoint], locator: &HoverLocator<'_>) -> Option<HoverPoint> {
    let last = curve.last()?;
    let anchor = locator.anchor(last.date);
    Some(HoverPoint {
        date: last.date,
        time: last.time,
        x: anchor.x,
        y: anchor.y,
    })
}
