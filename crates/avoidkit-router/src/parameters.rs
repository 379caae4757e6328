//! Global routing cost parameters.

use avoidkit_core::{RoutingPenalty, RoutingType};

/// Penalty values, one per [`RoutingPenalty`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Penalties {
    pub segment: f64,
    pub angle: f64,
    pub crossing: f64,
    pub fixed_shared_path: f64,
    pub port_direction: f64,
}

impl Penalties {
    pub fn get(&self, kind: RoutingPenalty) -> f64 {
        match kind {
            RoutingPenalty::Segment => self.segment,
            RoutingPenalty::Angle => self.angle,
            RoutingPenalty::Crossing => self.crossing,
            RoutingPenalty::FixedSharedPath => self.fixed_shared_path,
            RoutingPenalty::PortDirection => self.port_direction,
        }
    }

    pub fn set(&mut self, kind: RoutingPenalty, value: f64) {
        let slot = match kind {
            RoutingPenalty::Segment => &mut self.segment,
            RoutingPenalty::Angle => &mut self.angle,
            RoutingPenalty::Crossing => &mut self.crossing,
            RoutingPenalty::FixedSharedPath => &mut self.fixed_shared_path,
            RoutingPenalty::PortDirection => &mut self.port_direction,
        };
        *slot = value;
    }
}

/// Everything an engine needs besides the geometry of one connector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoutingParameters {
    pub routing_type: RoutingType,
    pub penalties: Penalties,
    /// Spacing between parallel orthogonal segments.
    pub nudge_distance: f64,
}

impl RoutingParameters {
    pub fn new(routing_type: RoutingType) -> Self {
        Self {
            routing_type,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalties_set_and_get_every_kind() {
        let mut p = Penalties::default();
        for (i, kind) in RoutingPenalty::ALL.iter().enumerate() {
            p.set(*kind, i as f64 * 10.0);
        }
        for (i, kind) in RoutingPenalty::ALL.iter().enumerate() {
            assert_eq!(p.get(*kind), i as f64 * 10.0);
        }
    }
}
