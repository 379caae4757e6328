//! The router facade.

use std::collections::{BTreeMap, BTreeSet};

use avoidkit_core::{polygon_center, GeometryError, Point, Polygon, RoutingPenalty, RoutingType};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::engine::{RouteRequest, RoutingEngine, WaypointEngine};
use crate::error::{Result, RouterError};
use crate::parameters::RoutingParameters;
use crate::types::{ConnRef, Endpoint, ObstacleRef, RouteReceiver, RouteUpdate};

#[derive(Debug, Clone)]
struct Obstacle {
    polygon: Polygon,
}

#[derive(Debug, Clone, Default)]
struct Connector {
    source: Option<Endpoint>,
    dest: Option<Endpoint>,
    checkpoints: Vec<Point>,
    route: Vec<Point>,
}

/// Owns one routing engine plus every obstacle and connector registered
/// with it.
///
/// Mutations only record what is stale. [`Router::solve`] re-routes the
/// stale connectors (every connector once an obstacle changed) and queues a
/// [`RouteUpdate`] for each route that actually changed.
pub struct Router {
    engine: Box<dyn RoutingEngine>,
    params: RoutingParameters,
    obstacles: BTreeMap<ObstacleRef, Obstacle>,
    connectors: BTreeMap<ConnRef, Connector>,
    next_id: u64,
    stale: BTreeSet<ConnRef>,
    obstacles_changed: bool,
    updates: UnboundedSender<RouteUpdate>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("engine", &self.engine.name())
            .field("params", &self.params)
            .field("obstacles", &self.obstacles.len())
            .field("connectors", &self.connectors.len())
            .finish()
    }
}

impl Router {
    /// Creates a router backed by the [`WaypointEngine`].
    pub fn new(routing_type: RoutingType) -> (Self, RouteReceiver) {
        Self::with_engine(
            Box::new(WaypointEngine),
            RoutingParameters::new(routing_type),
        )
    }

    /// Creates a router around a custom engine. The returned receiver gets
    /// every route update produced by [`Router::solve`].
    pub fn with_engine(
        engine: Box<dyn RoutingEngine>,
        params: RoutingParameters,
    ) -> (Self, RouteReceiver) {
        let (tx, rx) = unbounded_channel();
        let router = Self {
            engine,
            params,
            obstacles: BTreeMap::new(),
            connectors: BTreeMap::new(),
            next_id: 1,
            stale: BTreeSet::new(),
            obstacles_changed: false,
            updates: tx,
        };
        (router, RouteReceiver::new(rx))
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn parameters(&self) -> &RoutingParameters {
        &self.params
    }

    pub fn set_routing_penalty(&mut self, kind: RoutingPenalty, value: f64) {
        self.params.penalties.set(kind, value);
    }

    pub fn routing_penalty(&self, kind: RoutingPenalty) -> f64 {
        self.params.penalties.get(kind)
    }

    pub fn set_orthogonal_nudge_distance(&mut self, distance: f64) {
        self.params.nudge_distance = distance;
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // Obstacles

    pub fn create_obstacle(&mut self, polygon: &[Point]) -> Result<ObstacleRef> {
        check_polygon(polygon)?;
        let r = ObstacleRef(self.allocate_id());
        self.obstacles.insert(
            r,
            Obstacle {
                polygon: polygon.iter().copied().collect(),
            },
        );
        self.obstacles_changed = true;
        tracing::debug!(obstacle = %r, "Obstacle created");
        Ok(r)
    }

    pub fn move_obstacle(&mut self, r: ObstacleRef, polygon: &[Point]) -> Result<()> {
        check_polygon(polygon)?;
        let obstacle = self
            .obstacles
            .get_mut(&r)
            .ok_or(RouterError::UnknownObstacle(r))?;
        if obstacle.polygon.as_slice() != polygon {
            obstacle.polygon = polygon.iter().copied().collect();
            self.obstacles_changed = true;
        }
        Ok(())
    }

    /// Deletes an obstacle. Connector ends still bound to it fall back to
    /// free points at the obstacle's last centre.
    pub fn delete_obstacle(&mut self, r: ObstacleRef) -> Result<()> {
        let obstacle = self
            .obstacles
            .remove(&r)
            .ok_or(RouterError::UnknownObstacle(r))?;
        let center = polygon_center(&obstacle.polygon);
        for (conn, connector) in self.connectors.iter_mut() {
            for end in [&mut connector.source, &mut connector.dest] {
                if *end == Some(Endpoint::Obstacle(r)) {
                    tracing::warn!(
                        obstacle = %r,
                        conn = %conn,
                        "Deleting obstacle with a bound connector end"
                    );
                    *end = Some(Endpoint::Point(center));
                    self.stale.insert(*conn);
                }
            }
        }
        self.obstacles_changed = true;
        tracing::debug!(obstacle = %r, "Obstacle deleted");
        Ok(())
    }

    pub fn obstacle_polygon(&self, r: ObstacleRef) -> Option<&[Point]> {
        self.obstacles.get(&r).map(|o| o.polygon.as_slice())
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    // Connectors

    pub fn create_connector(&mut self) -> ConnRef {
        let c = ConnRef(self.allocate_id());
        self.connectors.insert(c, Connector::default());
        tracing::debug!(conn = %c, "Connector created");
        c
    }

    pub fn delete_connector(&mut self, c: ConnRef) -> Result<()> {
        self.connectors
            .remove(&c)
            .ok_or(RouterError::UnknownConnector(c))?;
        self.stale.remove(&c);
        tracing::debug!(conn = %c, "Connector deleted");
        Ok(())
    }

    pub fn set_source_endpoint(&mut self, c: ConnRef, endpoint: impl Into<Endpoint>) -> Result<()> {
        let endpoint = self.check_endpoint(endpoint.into())?;
        let connector = self.connector_mut(c)?;
        if connector.source != Some(endpoint) {
            connector.source = Some(endpoint);
            self.stale.insert(c);
        }
        Ok(())
    }

    pub fn set_dest_endpoint(&mut self, c: ConnRef, endpoint: impl Into<Endpoint>) -> Result<()> {
        let endpoint = self.check_endpoint(endpoint.into())?;
        let connector = self.connector_mut(c)?;
        if connector.dest != Some(endpoint) {
            connector.dest = Some(endpoint);
            self.stale.insert(c);
        }
        Ok(())
    }

    pub fn source_endpoint(&self, c: ConnRef) -> Result<Option<Endpoint>> {
        Ok(self.connector(c)?.source)
    }

    pub fn dest_endpoint(&self, c: ConnRef) -> Result<Option<Endpoint>> {
        Ok(self.connector(c)?.dest)
    }

    pub fn set_checkpoints(&mut self, c: ConnRef, checkpoints: Vec<Point>) -> Result<()> {
        let connector = self.connector_mut(c)?;
        if connector.checkpoints != checkpoints {
            connector.checkpoints = checkpoints;
            self.stale.insert(c);
        }
        Ok(())
    }

    pub fn checkpoints(&self, c: ConnRef) -> Result<&[Point]> {
        Ok(&self.connector(c)?.checkpoints)
    }

    /// The route computed by the last successful solve, empty before that.
    pub fn display_route(&self, c: ConnRef) -> Result<&[Point]> {
        Ok(&self.connector(c)?.route)
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.obstacles_changed || !self.stale.is_empty()
    }

    /// Runs one re-route pass over everything changed since the last call.
    ///
    /// Connectors without both endpoints are skipped. An engine failure
    /// keeps that connector's previous route. Returns the number of
    /// connectors whose route changed.
    pub fn solve(&mut self) -> usize {
        let targets: Vec<ConnRef> = if self.obstacles_changed {
            self.connectors.keys().copied().collect()
        } else {
            self.stale.iter().copied().collect()
        };

        let polygons: Vec<&[Point]> = self
            .obstacles
            .values()
            .map(|o| o.polygon.as_slice())
            .collect();

        let mut results = Vec::new();
        for conn in targets {
            let Some(connector) = self.connectors.get(&conn) else {
                continue;
            };
            let (Some(source), Some(dest)) = (connector.source, connector.dest) else {
                continue;
            };
            let resolved = self
                .resolve(source)
                .and_then(|s| self.resolve(dest).map(|d| (s, d)));
            let (source, dest) = match resolved {
                Ok(points) => points,
                Err(e) => {
                    tracing::warn!(conn = %conn, "Cannot resolve connector ends: {}", e);
                    continue;
                }
            };
            let request = RouteRequest {
                conn,
                source,
                dest,
                checkpoints: &connector.checkpoints,
                obstacles: &polygons,
                params: &self.params,
            };
            match self.engine.route(&request) {
                Ok(route) if route != connector.route => results.push((conn, route)),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(conn = %conn, "Routing failed, keeping previous route: {}", e);
                }
            }
        }

        let changed = results.len();
        for (conn, route) in results {
            let Some(connector) = self.connectors.get_mut(&conn) else {
                continue;
            };
            connector.route = route.clone();
            let update = RouteUpdate {
                conn,
                route,
                checkpoints: connector.checkpoints.clone(),
            };
            if self.updates.send(update).is_err() {
                tracing::debug!(conn = %conn, "Route receiver dropped");
            }
        }

        self.stale.clear();
        self.obstacles_changed = false;
        tracing::debug!(changed, engine = self.engine.name(), "Solve pass finished");
        changed
    }

    fn resolve(&self, endpoint: Endpoint) -> Result<Point> {
        match endpoint {
            Endpoint::Point(p) => Ok(p),
            Endpoint::Obstacle(r) => self
                .obstacle_polygon(r)
                .map(polygon_center)
                .ok_or(RouterError::UnknownObstacle(r)),
        }
    }

    fn check_endpoint(&self, endpoint: Endpoint) -> Result<Endpoint> {
        match endpoint {
            Endpoint::Obstacle(r) if !self.obstacles.contains_key(&r) => {
                Err(RouterError::UnknownObstacle(r))
            }
            _ => Ok(endpoint),
        }
    }

    fn connector(&self, c: ConnRef) -> Result<&Connector> {
        self.connectors
            .get(&c)
            .ok_or(RouterError::UnknownConnector(c))
    }

    fn connector_mut(&mut self, c: ConnRef) -> Result<&mut Connector> {
        self.connectors
            .get_mut(&c)
            .ok_or(RouterError::UnknownConnector(c))
    }
}

fn check_polygon(polygon: &[Point]) -> Result<()> {
    if polygon.len() < 3 {
        return Err(GeometryError::DegeneratePolygon {
            min: 3,
            got: polygon.len(),
        }
        .into());
    }
    Ok(())
}
