use crate::error::Result;
use crate::point::Point;

/// Common interface for hard clustering (one label per point).
pub trait Clustering {
    /// Run the clustering and return one cluster label per input point.
    fn fit_predict(&mut self, points: &[Point]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// Chooses the starting centroids for a batch run.
pub trait CentroidPicker {
    /// Pick the initial centroids for `points`.
    ///
    /// Implementations must be pure: the same input yields the same centroids.
    fn pick_centroids(&self, points: &[Point]) -> Vec<Point>;

    /// The number of centroids this picker aims for.
    fn n_clusters(&self) -> usize;
}

/// Receives a snapshot of the clustering state after every iteration.
///
/// Calls are synchronous and block the engine until they return. The
/// snapshot is borrowed read-only; implementations that need to keep it must
/// copy it.
pub trait Presenter {
    /// Observe iteration `iteration` with its clusters and the centroids the
    /// clusters were assigned against.
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]);
}

impl Presenter for () {
    #[inline]
    fn present(&mut self, _iteration: usize, _clusters: &[Vec<Point>], _centroids: &[Point]) {}
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        (**self).present(iteration, clusters, centroids);
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        (**self).present(iteration, clusters, centroids);
    }
}
