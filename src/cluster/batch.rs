//! Batch k-means over a fixed point set.
//!
//! Each iteration assigns every point to its nearest centroid, shows the
//! result to the presenter, and then moves each centroid to the mean of its
//! cluster. The iteration count is fixed; there is no convergence test.
//!
//! ## What the run returns
//!
//! [`KmeansRun`] holds the clusters of the last iteration together with the
//! centroids they were assigned against, which is exactly the last state the
//! presenter saw. The centroids recomputed at the very end of the loop are
//! kept separately in [`KmeansRun::refined_centroids`]; no extra assignment
//! pass is made against them.

use super::assign::{assign_labels, group_by_label};
use super::centroid::{refresh_centroids, EmptyClusterPolicy};
use super::init::OrderedPicker;
use super::traits::{CentroidPicker, Clustering, Presenter};
use crate::error::{Error, Result};
use crate::point::Point;

/// Default number of refinement iterations for a batch run.
pub const DEFAULT_BATCH_ITERATIONS: usize = 10;

/// Batch k-means with a pluggable centroid picker and presenter.
#[derive(Debug, Clone)]
pub struct BatchKmeans<S = OrderedPicker, P = ()> {
    picker: S,
    presenter: P,
    iterations: usize,
    empty_cluster_policy: EmptyClusterPolicy,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansRun {
    /// Clusters from the last iteration, one per centroid.
    pub clusters: Vec<Vec<Point>>,
    /// Centroids `clusters` were assigned against.
    pub centroids: Vec<Point>,
    /// Centroids recomputed from `clusters` after the last iteration.
    pub refined_centroids: Vec<Point>,
    /// Cluster index of each input point, in input order.
    pub labels: Vec<usize>,
}

impl BatchKmeans {
    /// Create a batch clusterer for `k` clusters using [`OrderedPicker`].
    pub fn new(k: usize) -> Result<Self> {
        let picker = OrderedPicker::new(k)?;
        tracing::debug!(k, "created batch k-means");
        Ok(Self {
            picker,
            presenter: (),
            iterations: DEFAULT_BATCH_ITERATIONS,
            empty_cluster_policy: EmptyClusterPolicy::default(),
        })
    }
}

impl<S: CentroidPicker, P: Presenter> BatchKmeans<S, P> {
    /// Set the number of refinement iterations (must be at least 1).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Replace the centroid picker.
    pub fn with_picker<S2: CentroidPicker>(self, picker: S2) -> BatchKmeans<S2, P> {
        BatchKmeans {
            picker,
            presenter: self.presenter,
            iterations: self.iterations,
            empty_cluster_policy: self.empty_cluster_policy,
        }
    }

    /// Replace the presenter.
    pub fn with_presenter<P2: Presenter>(self, presenter: P2) -> BatchKmeans<S, P2> {
        BatchKmeans {
            picker: self.picker,
            presenter,
            iterations: self.iterations,
            empty_cluster_policy: self.empty_cluster_policy,
        }
    }

    /// Choose how an emptied cluster is handled.
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Configured iteration count.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Consume the clusterer and return its presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Run k-means on `points`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `points` is empty.
    /// - [`Error::InvalidParameter`] if the iteration count is zero.
    /// - [`Error::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// - [`Error::EmptyCluster`] if a cluster empties out under
    ///   [`EmptyClusterPolicy::Fail`].
    pub fn find_k_means(&mut self, points: &[Point]) -> Result<KmeansRun> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "iterations",
                message: "must be at least 1",
            });
        }
        for p in points {
            p.ensure_finite()?;
        }

        let mut centroids = self.picker.pick_centroids(points);
        let mut labels = Vec::new();
        let mut clusters = Vec::new();
        let mut presented = Vec::new();

        for iteration in 0..self.iterations {
            labels = assign_labels(points, &centroids)?;
            clusters = group_by_label(points, &labels, centroids.len());
            tracing::trace!(
                iteration,
                sizes = ?clusters.iter().map(Vec::len).collect::<Vec<_>>(),
                "batch iteration"
            );
            self.presenter.present(iteration, &clusters, &centroids);

            let next = refresh_centroids(&clusters, &centroids, self.empty_cluster_policy)?;
            presented = std::mem::replace(&mut centroids, next);
        }

        tracing::debug!(
            n_points = points.len(),
            n_clusters = clusters.len(),
            iterations = self.iterations,
            "batch k-means finished"
        );

        Ok(KmeansRun {
            clusters,
            centroids: presented,
            refined_centroids: centroids,
            labels,
        })
    }
}

impl<S: CentroidPicker, P: Presenter> Clustering for BatchKmeans<S, P> {
    fn fit_predict(&mut self, points: &[Point]) -> Result<Vec<usize>> {
        Ok(self.find_k_means(points)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.picker.n_clusters()
    }
}
