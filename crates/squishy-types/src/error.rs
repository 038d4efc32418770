//! Error types for the squishy simulator.
//!
//! All crates return `SquishyResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the squishy simulator.
#[derive(Debug, Error)]
pub enum SquishyError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polygon could not be triangulated (fewer than 3 vertices,
    /// self-intersecting or degenerate outline).
    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    /// A particle index does not exist in the lattice or backend.
    #[error("Particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds {
        index: usize,
        count: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, SquishyError>`.
pub type SquishyResult<T> = Result<T, SquishyError>;
