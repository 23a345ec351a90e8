//! Starting-centroid selection for batch runs.

use super::traits::CentroidPicker;
use crate::error::{Error, Result};
use crate::point::Point;

/// Picks centroids at an even stride through the input, in arrival order.
///
/// Centroid `i` is `points[i * (n / k)]` (integer division). With fewer
/// points than clusters every point becomes a centroid. Coincident points
/// yield coincident centroids; that is tolerated, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedPicker {
    k: usize,
}

impl OrderedPicker {
    /// Create a picker targeting `k` centroids.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidClusterCount { requested: k });
        }
        Ok(Self { k })
    }
}

impl CentroidPicker for OrderedPicker {
    fn pick_centroids(&self, points: &[Point]) -> Vec<Point> {
        if points.len() < self.k {
            return points.to_vec();
        }
        let stride = points.len() / self.k;
        (0..self.k).map(|i| points[i * stride]).collect()
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
