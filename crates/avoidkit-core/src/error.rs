//! Error types for geometry operations.

use thiserror::Error;

/// Errors raised by geometry helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The matrix has no inverse, so canvas points cannot be mapped back
    /// into item space.
    #[error("Matrix is not invertible")]
    SingularMatrix,

    /// A polygon was built from too few points.
    #[error("Polygon needs at least {min} points, got {got}")]
    DegeneratePolygon {
        /// The minimum number of points.
        min: usize,
        /// The number of points supplied.
        got: usize,
    },
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
