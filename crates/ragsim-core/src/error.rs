//! Error types for ragsim-core.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating the allocation graph.
///
/// These are the only failure modes the engine has. Everything else is a
/// valid non-error outcome: releasing a free resource yields `None`,
/// auto-allocation may grant nothing, and detection may find no cycles.
/// A failed operation never mutates the graph.
#[derive(Debug, Error)]
pub enum Error {
    /// Request edge rejected: an endpoint is missing or of the wrong kind,
    /// or an identical request already exists.
    #[error("invalid request edge: {0}")]
    InvalidEdge(String),

    /// Allocation rejected: an endpoint is missing or of the wrong kind,
    /// or the resource is already held by some process.
    #[error("allocation conflict: {0}")]
    AllocationConflict(String),
}
