//! # Mesh Error Types
//!
//! Everything that can go wrong outside the hot path. Appends never fail;
//! they grow the buffers instead.

use thiserror::Error;

/// Errors raised by mesh configuration and bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read mesh config {path}: {reason}")]
    ConfigIo {
        /// File that was requested.
        path: String,
        /// Underlying IO error.
        reason: String,
    },

    /// A count was set beyond the allocated capacity.
    #[error("count {count} exceeds capacity {capacity}")]
    CountExceedsCapacity {
        /// Requested count.
        count: usize,
        /// Current capacity.
        capacity: usize,
    },
}

/// Result alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
