//! Event-to-centroid assignment

use super::Cluster;
use crate::time_domain::{Event, Timestamp};

/// Assign every event to its nearest centroid by absolute date distance.
///
/// Produces exactly one cluster per centroid, in centroid order; clusters that
/// attract no event stay empty. Ties go to the earlier centroid. The given
/// centroids only drive assignment: every non-empty cluster is re-centred on
/// the mean of its members.
pub fn assign_to_centroids(events: &[Event], centroids: &[f64]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = centroids
        .iter()
        .map(|&centroid| Cluster::empty(Timestamp(centroid)))
        .collect();

    if clusters.is_empty() {
        return clusters;
    }

    for event in events {
        let mut nearest = 0;
        let mut nearest_distance = (centroids[0] - event.date.seconds()).abs();
        for (index, centroid) in centroids.iter().enumerate().skip(1) {
            let distance = (centroid - event.date.seconds()).abs();
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }
        clusters[nearest].members.push(event.clone());
    }

    for cluster in clusters.iter_mut() {
        if let Some(mean) = Timestamp::mean(cluster.members.iter().map(|e| e.date)) {
            cluster.centroid = mean;
        }
    }
    clusters
}

/// One cluster per event, centred on the event's own date.
pub fn singleton_clusters(events: &[Event]) -> Vec<Cluster> {
    events.iter().cloned().map(Cluster::singleton).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(seconds: f64) -> Event {
        Event::new(Timestamp(seconds), 0.0).with_description(format!("at {seconds}"))
    }

    #[test]
    fn assigns_to_nearest_centroid() {
        let events = [event(1.0), event(9.0), event(52.0), event(48.0)];
        let clusters = assign_to_centroids(&events, &[0.0, 10.0, 50.0]);
        let sizes: Vec<usize> = clusters.iter().map(Cluster::len).collect();
        assert_eq!(sizes, vec![1, 1, 2]);
        assert_eq!(clusters[2].members[0].date, Timestamp(52.0));
        assert_eq!(clusters[2].members[1].date, Timestamp(48.0));
    }

    #[test]
    fn centroids_are_member_means() {
        let events = [event(1.0), event(9.0), event(52.0), event(48.0)];
        let clusters = assign_to_centroids(&events, &[0.0, 10.0, 50.0]);
        assert_eq!(clusters[0].centroid, Timestamp(1.0));
        assert_eq!(clusters[1].centroid, Timestamp(9.0));
        assert_eq!(clusters[2].centroid, Timestamp(50.0));

        let pulled = assign_to_centroids(&[event(10.0), event(20.0), event(30.0)], &[0.0, 100.0]);
        assert_eq!(pulled[0].centroid, Timestamp(20.0));
        assert_eq!(pulled[1].centroid, Timestamp(100.0));
    }

    #[test]
    fn ties_go_to_first_centroid() {
        let clusters = assign_to_centroids(&[event(5.0)], &[0.0, 10.0]);
        assert_eq!(clusters[0].len(), 1);
        assert!(clusters[1].is_empty());
    }

    #[test]
    fn keeps_empty_clusters_in_centroid_order() {
        let clusters = assign_to_centroids(&[event(100.0)], &[0.0, 10.0, 99.0]);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[1].centroid, Timestamp(10.0));
        assert!(clusters[0].is_empty() && clusters[1].is_empty());
    }

    #[test]
    fn no_centroids_means_no_clusters() {
        assert!(assign_to_centroids(&[event(1.0)], &[]).is_empty());
    }

    #[test]
    fn singletons_mirror_events() {
        let clusters = singleton_clusters(&[event(3.0), event(7.0)]);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[1].centroid, Timestamp(7.0));
        assert_eq!(clusters[1].members, vec![event(7.0)]);
    }
}
