//! Label layout for the merged clusters

use crate::clustering::Cluster;
use crate::config::{AnnotationConfig, LayoutConfig};
use crate::hover::ScreenPoint;
use serde::Serialize;

/// Appended to a collapsed label that hides further members.
pub const MORE_MEMBERS_SUFFIX: &str = "\n\n[...]";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Index of the cluster in the merged cluster list.
    pub cluster: usize,
    pub anchor: ScreenPoint,
    /// Label offset from the anchor; `dx` is negative for labels opening left.
    pub dx: f64,
    pub dy: f64,
    pub hovered: bool,
    /// Whether the label body is drawn (only the connector otherwise).
    pub expanded: bool,
    pub subtitles: Vec<String>,
    pub member_count: usize,
}

/// Lay out one annotation per non-empty cluster.
///
/// `anchors` is parallel to `clusters`. The hovered cluster lists every
/// member description; the others show their first description only. While
/// something is hovered, the other labels collapse to their connector.
pub fn layout_annotations(
    clusters: &[Cluster],
    anchors: &[ScreenPoint],
    hovered: Option<usize>,
    layout: &LayoutConfig,
    config: &AnnotationConfig,
) -> Vec<Annotation> {
    if !config.show_details {
        return Vec::new();
    }

    let midpoint = layout.label_midpoint();
    clusters
        .iter()
        .zip(anchors)
        .enumerate()
        .filter(|(_, (cluster, _))| !cluster.is_empty())
        .map(|(index, (cluster, anchor))| {
            let is_hovered = hovered == Some(index);
            let direction = if anchor.x < midpoint { 1.0 } else { -1.0 };
            Annotation {
                cluster: index,
                anchor: *anchor,
                dx: direction * config.label_dx,
                dy: config.label_dy,
                hovered: is_hovered,
                expanded: is_hovered || hovered.is_none(),
                subtitles: subtitles(cluster, is_hovered),
                member_count: cluster.len(),
            }
        })
        .collect()
}

fn subtitles(cluster: &Cluster, hovered: bool) -> Vec<String> {
    if hovered {
        return cluster.members.iter().map(|e| e.description.clone()).collect();
    }
    match cluster.members.first() {
        Some(first) if cluster.len() > 1 => vec![format!("{}{}", first.description, MORE_MEMBERS_SUFFIX)],
        Some(first) => vec![first.description.clone()],
        None => Vec::new(),
    }
}
