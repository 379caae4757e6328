//! Error types for the router facade.

use avoidkit_core::GeometryError;
use thiserror::Error;

use crate::types::{ConnRef, ObstacleRef};

/// Errors returned by [`crate::Router`] operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    /// The obstacle was never created or has been deleted.
    #[error("Unknown obstacle {0}")]
    UnknownObstacle(ObstacleRef),

    /// The connector was never created or has been deleted.
    #[error("Unknown connector {0}")]
    UnknownConnector(ConnRef),

    /// Invalid geometry handed to the router.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The routing engine could not produce a path.
    #[error("Routing engine failed: {reason}")]
    Engine {
        /// The reason reported by the engine.
        reason: String,
    },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_error_display() {
        assert_eq!(
            RouterError::UnknownObstacle(ObstacleRef(3)).to_string(),
            "Unknown obstacle Obstacle(3)"
        );
        assert_eq!(
            RouterError::UnknownConnector(ConnRef(7)).to_string(),
            "Unknown connector Conn(7)"
        );
        let err: RouterError = GeometryError::SingularMatrix.into();
        assert_eq!(err.to_string(), "Geometry error: Matrix is not invertible");
    }
}
