//! Handles and messages exchanged with the router facade.

use avoidkit_core::Point;
use std::fmt;
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};

/// Opaque handle to an obstacle owned by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleRef(pub u64);

impl fmt::Display for ObstacleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Obstacle({})", self.0)
    }
}

/// Opaque handle to a connector owned by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnRef(pub u64);

impl fmt::Display for ConnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conn({})", self.0)
    }
}

/// One end of a connector.
///
/// An end bound to an obstacle has no coordinate of its own; the router
/// derives it from the obstacle's current polygon on every solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Point(Point),
    Obstacle(ObstacleRef),
}

impl Endpoint {
    pub fn obstacle(&self) -> Option<ObstacleRef> {
        match self {
            Endpoint::Obstacle(r) => Some(*r),
            Endpoint::Point(_) => None,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Endpoint::Obstacle(_))
    }
}

impl From<Point> for Endpoint {
    fn from(p: Point) -> Self {
        Endpoint::Point(p)
    }
}

impl From<ObstacleRef> for Endpoint {
    fn from(r: ObstacleRef) -> Self {
        Endpoint::Obstacle(r)
    }
}

/// Notification that a connector's display route changed during a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteUpdate {
    pub conn: ConnRef,
    /// Ordered path points in router (canvas) coordinates.
    pub route: Vec<Point>,
    /// The checkpoints the route was computed for, in submission order.
    /// Each one appears verbatim in `route`.
    pub checkpoints: Vec<Point>,
}

/// Receiving side of the route-changed channel.
///
/// Updates are queued during [`crate::Router::solve`] and only observed
/// when the owner drains them, so handlers never run inside the solve pass.
#[derive(Debug)]
pub struct RouteReceiver {
    rx: UnboundedReceiver<RouteUpdate>,
}

impl RouteReceiver {
    pub(crate) fn new(rx: UnboundedReceiver<RouteUpdate>) -> Self {
        Self { rx }
    }

    /// Returns the next queued update, if any.
    pub fn try_next(&mut self) -> Option<RouteUpdate> {
        match self.rx.try_recv() {
            Ok(update) => Some(update),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Takes every queued update.
    pub fn drain(&mut self) -> Vec<RouteUpdate> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
