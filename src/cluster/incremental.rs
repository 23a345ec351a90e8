//! Incremental k-means: points arrive one at a time.
//!
//! The engine starts in [`Phase::Filling`]: each new distinct point opens its
//! own singleton cluster and doubles as that cluster's centroid. Once `k`
//! centroids exist it switches to [`Phase::Converging`] for good. From then
//! on every new point is placed in its nearest cluster, and a fixed number of
//! refinement rounds re-partition *all* points seen so far and move the
//! centroids to their cluster means.
//!
//! Every state change is shown to the presenter. The initial placement of a
//! point is presented as iteration `0`; refinement rounds are numbered from
//! `1`.

use super::assign::{nearest_centroid, partition};
use super::centroid::{refresh_centroids, EmptyClusterPolicy};
use super::traits::Presenter;
use crate::error::{Error, Result};
use crate::point::Point;

/// Default number of refinement rounds after each added point.
pub const DEFAULT_INCREMENTAL_ROUNDS: usize = 3;

/// Lifecycle of an [`IncrementalKmeans`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `k` centroids exist; new points open new clusters.
    Filling,
    /// Exactly `k` centroids exist; new points trigger refinement.
    Converging,
}

/// Live centroids and the clusters assigned to them.
///
/// `clusters[i]` always holds the points assigned to `centroids[i]`, and the
/// two lists always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusteringState {
    centroids: Vec<Point>,
    clusters: Vec<Vec<Point>>,
}

impl ClusteringState {
    /// Current centroids.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Current clusters, index-aligned with [`centroids`](Self::centroids).
    pub fn clusters(&self) -> &[Vec<Point>] {
        &self.clusters
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Whether no cluster exists yet.
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    fn open_cluster(&mut self, p: Point) {
        self.centroids.push(p);
        self.clusters.push(vec![p]);
    }
}

/// Incremental k-means engine.
///
/// ```rust
/// use kstream::{IncrementalKmeans, Phase, Point};
///
/// let mut engine = IncrementalKmeans::new(2).unwrap();
/// engine.add_point(Point::new(0.0, 0.0)).unwrap();
/// engine.add_point(Point::new(10.0, 0.0)).unwrap();
/// assert_eq!(engine.phase(), Phase::Converging);
///
/// engine.add_point(Point::new(2.0, 0.0)).unwrap();
/// assert_eq!(engine.state().centroids()[0], Point::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalKmeans<P = ()> {
    k: usize,
    rounds: usize,
    empty_cluster_policy: EmptyClusterPolicy,
    points: Vec<Point>,
    state: ClusteringState,
    presenter: P,
}

impl IncrementalKmeans {
    /// Create an engine that grows to `k` clusters.
    ///
    /// Returns [`Error::InvalidClusterCount`] when `k == 0`.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidClusterCount { requested: k });
        }
        tracing::debug!(k, "created incremental k-means");
        Ok(Self {
            k,
            rounds: DEFAULT_INCREMENTAL_ROUNDS,
            empty_cluster_policy: EmptyClusterPolicy::default(),
            points: Vec::new(),
            state: ClusteringState::default(),
            presenter: (),
        })
    }
}

impl<P: Presenter> IncrementalKmeans<P> {
    /// Set the number of refinement rounds run after each point once
    /// converging. Zero disables refinement.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replace the presenter.
    pub fn with_presenter<P2: Presenter>(self, presenter: P2) -> IncrementalKmeans<P2> {
        IncrementalKmeans {
            k: self.k,
            rounds: self.rounds,
            empty_cluster_policy: self.empty_cluster_policy,
            points: self.points,
            state: self.state,
            presenter,
        }
    }

    /// Choose how an emptied cluster is handled during refinement.
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Target number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Configured refinement rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.state.len() < self.k {
            Phase::Filling
        } else {
            Phase::Converging
        }
    }

    /// Current centroids and clusters.
    pub fn state(&self) -> &ClusteringState {
        &self.state
    }

    /// Every point added so far, in arrival order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Consume the engine and return its presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Add a point and update the clustering.
    ///
    /// While filling, a point that coincides with an existing centroid joins
    /// that cluster instead of opening a new one.
    ///
    /// # Errors
    ///
    /// - [`Error::NonFinitePoint`] if a coordinate is NaN or infinite; the
    ///   point is not recorded.
    /// - [`Error::EmptyCluster`] if refinement empties a cluster under
    ///   [`EmptyClusterPolicy::Fail`]. The point stays recorded and the state
    ///   keeps the last consistent partition.
    pub fn add_point(&mut self, p: Point) -> Result<()> {
        p.ensure_finite()?;
        self.points.push(p);

        match self.phase() {
            Phase::Filling => self.grow(p),
            Phase::Converging => self.refine(p),
        }
    }

    /// Add every point from `points`, in order, stopping at the first error.
    pub fn extend<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().try_for_each(|p| self.add_point(p))
    }

    fn grow(&mut self, p: Point) -> Result<()> {
        match self.state.centroids.iter().position(|c| *c == p) {
            Some(idx) => self.state.clusters[idx].push(p),
            None => {
                self.state.open_cluster(p);
                if self.phase() == Phase::Converging {
                    tracing::debug!(k = self.k, n_points = self.points.len(), "converging");
                }
            }
        }
        self.present(0);
        Ok(())
    }

    fn refine(&mut self, p: Point) -> Result<()> {
        let idx = nearest_centroid(&p, &self.state.centroids)?;
        self.state.clusters[idx].push(p);
        self.present(0);

        for round in 1..=self.rounds {
            self.state.clusters = partition(&self.points, &self.state.centroids)?;
            self.present(round);
            self.state.centroids = refresh_centroids(
                &self.state.clusters,
                &self.state.centroids,
                self.empty_cluster_policy,
            )?;
        }

        tracing::debug!(
            n_points = self.points.len(),
            rounds = self.rounds,
            "refined after new point"
        );
        Ok(())
    }

    fn present(&mut self, iteration: usize) {
        tracing::trace!(
            iteration,
            sizes = ?self.state.clusters.iter().map(Vec::len).collect::<Vec<_>>(),
            "incremental iteration"
        );
        self.presenter
            .present(iteration, &self.state.clusters, &self.state.centroids);
    }
}
