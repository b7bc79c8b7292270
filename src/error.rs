//! Error types for pixelmap_routing

use crate::Point;
use thiserror::Error;

/// The failures a graph build or query can report.
///
/// All variants are local, synchronous and recoverable; nothing in this crate
/// retries internally or aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied parameter is out of range (zero step, non-positive
    /// pixel length, degenerate raster dimensions, negative terrain cost).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Edges or segments were requested from a graph whose nodes are missing
    /// or do not match the supplied terrain table.
    #[error("Graph not initialized: {0}")]
    GraphNotInitialized(String),

    /// A query coordinate is not part of the sampled node set.
    #[error("No node at {0:?}")]
    NodeNotFound(Point),

    /// The two query nodes are not connected by any sequence of edges.
    #[error("No path from {0:?} to {1:?}")]
    NoPathFound(Point, Point),
}

/// Shorthand for results carrying a [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
