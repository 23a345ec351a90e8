//! Nearest-centroid assignment.

use crate::error::{Error, Result};
use crate::point::Point;

/// Index of the centroid closest to `point`.
///
/// Ties go to the lowest index: the scan only moves on a strictly smaller
/// distance. Returns [`Error::NoCentroids`] when `centroids` is empty.
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> Result<usize> {
    let (first, rest) = centroids.split_first().ok_or(Error::NoCentroids)?;

    let mut best_idx = 0;
    let mut best_dist = point.distance_to(first);
    for (i, centroid) in rest.iter().enumerate() {
        let d = point.distance_to(centroid);
        if d < best_dist {
            best_dist = d;
            best_idx = i + 1;
        }
    }
    Ok(best_idx)
}

/// Label every point with the index of its nearest centroid.
pub fn assign_labels(points: &[Point], centroids: &[Point]) -> Result<Vec<usize>> {
    points
        .iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

/// Group `points` into one cluster per centroid, preserving arrival order.
///
/// Clusters whose centroid attracts no point are returned empty.
pub fn partition(points: &[Point], centroids: &[Point]) -> Result<Vec<Vec<Point>>> {
    let labels = assign_labels(points, centroids)?;
    Ok(group_by_label(points, &labels, centroids.len()))
}

pub(crate) fn group_by_label(points: &[Point], labels: &[usize], k: usize) -> Vec<Vec<Point>> {
    debug_assert_eq!(points.len(), labels.len());
    let mut clusters = vec![Vec::new(); k];
    for (point, &label) in points.iter().zip(labels) {
        clusters[label].push(*point);
    }
    clusters
}
