//! Routing engines compute the path of a single connector.
//!
//! The router facade owns bookkeeping (which connectors are stale, where
//! bound endpoints currently are) and hands each stale connector to a
//! [`RoutingEngine`]. Obstacle avoidance is entirely the engine's business.

use avoidkit_core::{Point, RoutingType, EPSILON};

use crate::error::{Result, RouterError};
use crate::parameters::RoutingParameters;
use crate::types::ConnRef;

/// Input for routing one connector. All points are in router coordinates.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub conn: ConnRef,
    pub source: Point,
    pub dest: Point,
    /// Waypoints the route must pass through, in order.
    pub checkpoints: &'a [Point],
    /// Every registered obstacle outline.
    pub obstacles: &'a [&'a [Point]],
    pub params: &'a RoutingParameters,
}

impl RouteRequest<'_> {
    /// Source, checkpoints and destination in route order.
    pub fn waypoints(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.checkpoints.len() + 2);
        points.push(self.source);
        points.extend_from_slice(self.checkpoints);
        points.push(self.dest);
        points
    }
}

/// A path-finding backend.
///
/// Implementations must return a route that starts at `source`, ends at
/// `dest` and contains every checkpoint verbatim, in order.
pub trait RoutingEngine: Send {
    fn name(&self) -> &str;

    fn route(&self, request: &RouteRequest<'_>) -> Result<Vec<Point>>;
}

/// Connects the waypoints directly without avoiding obstacles.
///
/// Orthogonal routing inserts one horizontal-then-vertical bend between
/// waypoints that are not axis aligned. Coinciding waypoints stay in the
/// route so every checkpoint is echoed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaypointEngine;

impl RoutingEngine for WaypointEngine {
    fn name(&self) -> &str {
        "waypoint"
    }

    fn route(&self, request: &RouteRequest<'_>) -> Result<Vec<Point>> {
        let waypoints = request.waypoints();
        if let Some(bad) = waypoints
            .iter()
            .find(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(RouterError::Engine {
                reason: format!("non-finite waypoint {} on {}", bad, request.conn),
            });
        }

        // Waypoints are kept verbatim, even when two of them coincide.
        let mut route: Vec<Point> = Vec::with_capacity(waypoints.len() * 2);
        route.push(waypoints[0]);
        for pair in waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if request.params.routing_type == RoutingType::Orthogonal
                && (a.x - b.x).abs() > EPSILON
                && (a.y - b.y).abs() > EPSILON
            {
                route.push(Point::new(b.x, a.y));
            }
            route.push(b);
        }
        Ok(route)
    }
}
