//! Error types for trapnd

use thiserror::Error;

/// Result type for integration setup and reduction.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed inputs rejected before any integrand evaluation takes place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The lower and upper bound sequences have different lengths
    #[error("bound dimensions differ: lower has {lower} entries, upper has {upper}")]
    DimensionMismatch { lower: usize, upper: usize },

    /// No dimensions at all
    #[error("integration domain has no dimensions")]
    EmptyDomain,

    /// The grid resolution must be positive
    #[error("segments_count must be positive")]
    ZeroSegments,

    /// An upper bound lies below its lower bound (or either is NaN)
    #[error("upper bound {upper} is below lower bound {lower} in dimension {dim}")]
    InvertedBounds { dim: usize, lower: f64, upper: f64 },

    /// `segments ^ dims` does not fit in a `usize` cell index
    #[error("{segments}^{dims} cells overflow the index type")]
    CellCountOverflow { segments: usize, dims: usize },

    /// A worker group needs at least one member
    #[error("worker count must be positive")]
    NoWorkers,

    /// Rank outside `[0, size)`
    #[error("invalid rank {rank} for a group of {size} workers")]
    InvalidRank { rank: usize, size: usize },

    /// The worker thread pool could not be started
    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(String),
}
