use thiserror::Error;

/// Errors returned by the clustering engines in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Batch clustering was invoked with no points.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is not usable (k must be at least 1).
    #[error("invalid cluster count: requested {requested}, must be at least 1")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
    },

    /// A centroid was requested for a cluster with no points.
    #[error("cannot compute the centroid of empty cluster {index}")]
    EmptyCluster {
        /// Index of the empty cluster.
        index: usize,
    },

    /// Nearest-centroid assignment was asked to choose among zero centroids.
    ///
    /// This only happens when a caller sequences the engine steps incorrectly.
    #[error("no centroids to assign against")]
    NoCentroids,

    /// A point with a NaN or infinite coordinate was supplied.
    #[error("non-finite point ({x}, {y})")]
    NonFinitePoint {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
