//! Incremental k-means for 2D points.
//!
//! `kstream` groups a growing set of points into `k` clusters, re-partitioning
//! and re-centering every time a point arrives.
//!
//! The primary public API is under [`cluster`], which provides:
//! - batch k-means (stride seeding, fixed iteration count)
//! - incremental k-means (singleton growth up to `k`, refinement per point)
//! - presenters that observe every iteration (printing, logging, recording, chaining)
//!
//! Diagnostics are emitted through [`tracing`]; install a subscriber to see them.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod point;

pub use cluster::{
    from_fn, BatchKmeans, CentroidPicker, ChainingPresenter, Clustering, ClusteringState,
    EmptyClusterPolicy, History, IncrementalKmeans, KmeansRun, LoggingPresenter, OrderedPicker,
    Phase, Presenter, PrintingPresenter, Snapshot,
};
pub use error::{Error, Result};
pub use point::{distance, Point};
