//! Fixed-point merging of clusters that sit too close together

use super::Cluster;

/// Merge distance for the current zoom factor.
///
/// Zooming in (larger factor) shrinks the threshold so clusters come apart.
/// A non-positive or non-finite zoom leaves the base distance unchanged.
pub fn merge_threshold(base_distance: f64, zoom_factor: f64) -> f64 {
    if zoom_factor > 0.0 && zoom_factor.is_finite() {
        base_distance / zoom_factor
    } else {
        base_distance
    }
}

/// Merge adjacent clusters whose centroids are closer than `threshold`.
///
/// Empty clusters are dropped first. The scan runs left to right and restarts
/// after every merge; merged centroids are the mean of all member dates.
pub fn merge_adjacent(clusters: Vec<Cluster>, threshold: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = clusters.into_iter().filter(|c| !c.is_empty()).collect();
    let mut merges = 0usize;

    'scan: loop {
        for i in 0..clusters.len().saturating_sub(1) {
            if (clusters[i + 1].centroid - clusters[i].centroid).abs() < threshold {
                let next = clusters.remove(i + 1);
                clusters[i].absorb(next);
                merges += 1;
                continue 'scan;
            }
        }
        break;
    }

    if merges > 0 {
        log::debug!(
            "merged {} cluster pairs under threshold {:.1}s, {} remain",
            merges,
            threshold,
            clusters.len()
        );
    }
    clusters
}
