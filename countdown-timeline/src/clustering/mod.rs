//! Declutter clustering of the events visible in the current viewport
//!
//! Visible events are binned (natural breaks above the cutoff, singletons
//! below it), assigned to their nearest bin, and adjacent bins that would
//! render on top of each other are merged.

pub mod assign;
pub mod merge;
pub mod natural_breaks;

pub use assign::{assign_to_centroids, singleton_clusters};
pub use merge::{merge_adjacent, merge_threshold};
pub use natural_breaks::{JenksBreaks, NaturalBreaks};

use crate::config::ClusteringConfig;
use crate::time_domain::{DateExtent, Event, Timestamp};
use serde::Serialize;

/// A group of events annotated together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub centroid: Timestamp,
    pub members: Vec<Event>,
}

impl Cluster {
    pub fn empty(centroid: Timestamp) -> Self {
        Cluster {
            centroid,
            members: Vec::new(),
        }
    }

    pub fn singleton(event: Event) -> Self {
        Cluster {
            centroid: event.date,
            members: vec![event],
        }
    }

    /// Cluster centred on the mean member date, `None` without members.
    pub fn from_members(members: Vec<Event>) -> Option<Self> {
        let centroid = Timestamp::mean(members.iter().map(|e| e.date))?;
        Some(Cluster { centroid, members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append `other`'s members and re-centre on the mean of all members.
    pub fn absorb(&mut self, other: Cluster) {
        self.members.extend(other.members);
        if let Some(centroid) = Timestamp::mean(self.members.iter().map(|e| e.date)) {
            self.centroid = centroid;
        }
    }
}

/// Events whose date lies inside `window` (inclusive), in log order.
pub fn visible_events(events: &[Event], window: DateExtent) -> Vec<Event> {
    events
        .iter()
        .filter(|event| window.contains(event.date))
        .cloned()
        .collect()
}

/// Bin the visible events before merging.
///
/// Small sets become singletons; larger ones are partitioned by `breaks` into
/// `max_clusters` classes. A partitioner that returns nothing for a non-empty
/// input falls back to singletons so no event is dropped.
pub fn partition_visible(
    visible: &[Event],
    config: &ClusteringConfig,
    breaks: &dyn NaturalBreaks,
) -> Vec<Cluster> {
    if visible.len() <= config.partition_cutoff {
        return singleton_clusters(visible);
    }

    let mut dates: Vec<f64> = visible.iter().map(|e| e.date.seconds()).collect();
    dates.sort_by(f64::total_cmp);

    let centroids = breaks.partition(&dates, config.max_clusters);
    if centroids.is_empty() {
        log::warn!(
            "natural breaks returned no centroids for {} events, using singletons",
            visible.len()
        );
        return singleton_clusters(visible);
    }
    assign_to_centroids(visible, &centroids)
}

/// Full clustering cycle for the current viewport: filter, bin, assign, merge.
pub fn cluster_visible(
    events: &[Event],
    window: DateExtent,
    zoom_factor: f64,
    config: &ClusteringConfig,
    breaks: &dyn NaturalBreaks,
) -> Vec<Cluster> {
    let visible = visible_events(events, window);
    let binned = partition_visible(&visible, config, breaks);
    let threshold = merge_threshold(config.merge_distance_secs, zoom_factor);
    let merged = merge_adjacent(binned, threshold);
    log::trace!(
        "clustered {} visible events into {} clusters (zoom {:.2})",
        visible.len(),
        merged.len(),
        zoom_factor
    );
    merged
}
