//! Centroid recomputation.

use crate::error::{Error, Result};
use crate::point::Point;

/// What to do when refinement leaves a cluster with no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Abort the run with [`Error::EmptyCluster`].
    #[default]
    Fail,
    /// Keep the cluster's previous centroid.
    KeepCentroid,
}

/// Arithmetic mean of a non-empty cluster.
///
/// Plain left-to-right summation.
pub fn mean(cluster: &[Point]) -> Option<Point> {
    if cluster.is_empty() {
        return None;
    }
    let (sx, sy) = cluster
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = cluster.len() as f64;
    Some(Point::new(sx / n, sy / n))
}

/// New centroids as the mean of each cluster.
///
/// Every cluster must be non-empty; the first empty one is reported as
/// [`Error::EmptyCluster`].
pub fn recompute_centroids(clusters: &[Vec<Point>]) -> Result<Vec<Point>> {
    clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| mean(cluster).ok_or(Error::EmptyCluster { index }))
        .collect()
}

/// Recompute centroids, resolving empty clusters with `policy`.
///
/// `previous` holds the centroids the clusters were assigned against.
pub(crate) fn refresh_centroids(
    clusters: &[Vec<Point>],
    previous: &[Point],
    policy: EmptyClusterPolicy,
) -> Result<Vec<Point>> {
    debug_assert_eq!(clusters.len(), previous.len());
    match policy {
        EmptyClusterPolicy::Fail => recompute_centroids(clusters),
        EmptyClusterPolicy::KeepCentroid => Ok(clusters
            .iter()
            .zip(previous)
            .map(|(cluster, prev)| mean(cluster).unwrap_or(*prev))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_cluster() {
        let cluster = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(4.0, 2.0),
        ];
        assert_eq!(mean(&cluster), Some(Point::new(2.0, 2.0)));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn recompute_per_cluster() {
        let clusters = vec![
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(10.0, 10.0)],
        ];
        let centroids = recompute_centroids(&clusters).unwrap();
        assert_eq!(
            centroids,
            vec![Point::new(0.5, 0.5), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn empty_cluster_is_reported() {
        let clusters = vec![vec![Point::new(1.0, 1.0)], vec![], vec![]];
        assert_eq!(
            recompute_centroids(&clusters),
            Err(Error::EmptyCluster { index: 1 })
        );
    }

    #[test]
    fn keep_centroid_policy() {
        let clusters = vec![vec![Point::new(1.0, 1.0), Point::new(3.0, 1.0)], vec![]];
        let previous = [Point::new(0.0, 0.0), Point::new(7.0, 7.0)];

        let kept =
            refresh_centroids(&clusters, &previous, EmptyClusterPolicy::KeepCentroid).unwrap();
        assert_eq!(kept, vec![Point::new(2.0, 1.0), Point::new(7.0, 7.0)]);

        assert_eq!(
            refresh_centroids(&clusters, &previous, EmptyClusterPolicy::Fail),
            Err(Error::EmptyCluster { index: 1 })
        );
    }

    #[test]
    fn recompute_is_idempotent_at_fixed_point() {
        let clusters = vec![
            vec![Point::new(0.0, 0.0), Point::new(0.2, 0.4)],
            vec![Point::new(9.0, 9.0), Point::new(9.5, 8.5)],
        ];
        let once = recompute_centroids(&clusters).unwrap();
        let reassigned = crate::cluster::partition(&clusters.concat(), &once).unwrap();
        assert_eq!(reassigned, clusters);
        assert_eq!(recompute_centroids(&reassigned).unwrap(), once);
    }
}
