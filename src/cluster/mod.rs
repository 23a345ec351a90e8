//! K-means clustering for 2D points, in batch and incremental form.
//!
//! ## The algorithm
//!
//! Assign each point to the nearest centroid, then move every centroid to the
//! mean of its points. Repeat.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Both engines run a fixed number of refinement iterations rather than
//! testing for convergence, so every run performs the same amount of work
//! and shows the same number of snapshots to its presenter.
//!
//! ## Building blocks
//!
//! - [`nearest_centroid`]: index of the closest centroid, lowest index on ties.
//! - [`partition`]: group points by nearest centroid.
//! - [`recompute_centroids`]: the mean of each cluster.
//! - [`CentroidPicker`]: starting centroids for a batch run ([`OrderedPicker`]).
//! - [`Presenter`]: observer called after every iteration.
//!
//! ## Engines
//!
//! - [`BatchKmeans`]: a fixed point set, a fixed number of iterations.
//! - [`IncrementalKmeans`]: points arrive one at a time; the first `k`
//!   distinct points seed the clusters and every later point triggers a few
//!   rounds of refinement over everything seen so far.
//!
//! ## Usage
//!
//! ```rust
//! use kstream::cluster::{BatchKmeans, Clustering, IncrementalKmeans, Phase};
//! use kstream::Point;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.1, 0.1),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.1, 10.1),
//! ];
//!
//! // Batch
//! let labels = BatchKmeans::new(2).unwrap().fit_predict(&points).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! // Incremental
//! let mut engine = IncrementalKmeans::new(2).unwrap();
//! for p in &points {
//!     engine.add_point(*p).unwrap();
//! }
//! assert_eq!(engine.phase(), Phase::Converging);
//! assert_eq!(engine.state().clusters()[0].len(), 2);
//! ```

mod assign;
mod batch;
mod centroid;
mod incremental;
mod init;
mod presenter;
mod traits;

pub use assign::{assign_labels, nearest_centroid, partition};
pub use batch::{BatchKmeans, KmeansRun, DEFAULT_BATCH_ITERATIONS};
pub use centroid::{mean, recompute_centroids, EmptyClusterPolicy};
pub use incremental::{ClusteringState, IncrementalKmeans, Phase, DEFAULT_INCREMENTAL_ROUNDS};
pub use init::OrderedPicker;
pub use presenter::{
    from_fn, ChainingPresenter, FnPresenter, History, LoggingPresenter, PrintingPresenter,
    Snapshot,
};
pub use traits::{CentroidPicker, Clustering, Presenter};
