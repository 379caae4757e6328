//! Names for router configuration knobs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the router shapes connector paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingType {
    /// Straight segments between waypoints
    PolyLine,
    /// Horizontal and vertical segments only
    #[default]
    Orthogonal,
}

impl fmt::Display for RoutingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolyLine => write!(f, "polyline"),
            Self::Orthogonal => write!(f, "orthogonal"),
        }
    }
}

/// Cost terms the router weighs when choosing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPenalty {
    /// Cost per additional segment
    Segment,
    /// Cost per bend
    Angle,
    /// Cost per crossing with another connector
    Crossing,
    /// Cost of sharing a path with a fixed connector
    FixedSharedPath,
    /// Cost of leaving a shape against its port direction
    PortDirection,
}

impl RoutingPenalty {
    pub const ALL: [RoutingPenalty; 5] = [
        RoutingPenalty::Segment,
        RoutingPenalty::Angle,
        RoutingPenalty::Crossing,
        RoutingPenalty::FixedSharedPath,
        RoutingPenalty::PortDirection,
    ];
}

impl fmt::Display for RoutingPenalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment => write!(f, "segment"),
            Self::Angle => write!(f, "angle"),
            Self::Crossing => write!(f, "crossing"),
            Self::FixedSharedPath => write!(f, "fixed_shared_path"),
            Self::PortDirection => write!(f, "port_direction"),
        }
    }
}

/// How a line is split into router connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorLayout {
    /// One connector per run between checkpoints, chained at the checkpoints.
    #[default]
    PerSegment,
    /// One connector per line carrying the checkpoints as routing waypoints.
    Single,
}
