//! Keeps the router connectors of one line in step with its handles, and
//! writes solved routes back into the line.

use avoidkit_core::{first_polygon_crossing, ConnectorLayout, Matrix, Point, EPSILON};
use avoidkit_router::{ConnRef, Endpoint, ObstacleRef, Router};

use super::RouterSync;
use crate::error::{CanvasError, Result};
use crate::item::{ItemId, ItemKind, Line, LineEnd};

/// Router state of a line.
///
/// With [`ConnectorLayout::PerSegment`] the line owns one connector per run
/// between checkpoints, chained at the checkpoint coordinates. With
/// [`ConnectorLayout::Single`] it owns exactly one connector that carries the
/// checkpoints as routing waypoints.
///
/// The obstacle an end is bound to is remembered here; a bound end never
/// stores a coordinate of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorAdapter {
    item: ItemId,
    layout: ConnectorLayout,
    connectors: Vec<ConnRef>,
    head: Option<ObstacleRef>,
    tail: Option<ObstacleRef>,
}

impl ConnectorAdapter {
    /// Creates the connectors for `line` and pushes its current geometry.
    pub fn attach(
        item: ItemId,
        line: &Line,
        i2c: &Matrix,
        layout: ConnectorLayout,
        router: &mut Router,
    ) -> Result<Self> {
        let mut adapter = Self {
            item,
            layout,
            connectors: Vec::new(),
            head: None,
            tail: None,
        };
        adapter.push_geometry(line, i2c, router)?;
        tracing::debug!(item = %item, layout = ?layout, "Line attached to router");
        Ok(adapter)
    }

    pub fn layout(&self) -> ConnectorLayout {
        self.layout
    }

    pub fn connectors(&self) -> &[ConnRef] {
        &self.connectors
    }

    /// The obstacle `end` is bound to, if any.
    pub fn binding(&self, end: LineEnd) -> Option<ObstacleRef> {
        match end {
            LineEnd::Head => self.head,
            LineEnd::Tail => self.tail,
        }
    }

    /// Binds `end` to `obstacle`, source for the head and destination for
    /// the tail.
    pub(crate) fn bind(
        &mut self,
        end: LineEnd,
        obstacle: ObstacleRef,
        router: &mut Router,
    ) -> Result<()> {
        self.set_end(end, Endpoint::Obstacle(obstacle), router)?;
        *self.binding_mut(end) = Some(obstacle);
        Ok(())
    }

    /// Releases `end` to a free point at `at`, in canvas coordinates.
    pub(crate) fn unbind(&mut self, end: LineEnd, at: Point, router: &mut Router) -> Result<()> {
        self.set_end(end, Endpoint::Point(at), router)?;
        *self.binding_mut(end) = None;
        Ok(())
    }

    fn binding_mut(&mut self, end: LineEnd) -> &mut Option<ObstacleRef> {
        match end {
            LineEnd::Head => &mut self.head,
            LineEnd::Tail => &mut self.tail,
        }
    }

    fn set_end(&self, end: LineEnd, endpoint: Endpoint, router: &mut Router) -> Result<()> {
        let conn = match end {
            LineEnd::Head => self.connectors.first(),
            LineEnd::Tail => self.connectors.last(),
        }
        .copied()
        .ok_or(CanvasError::NotRouted(self.item))?;
        match end {
            LineEnd::Head => router.set_source_endpoint(conn, endpoint)?,
            LineEnd::Tail => router.set_dest_endpoint(conn, endpoint)?,
        }
        Ok(())
    }

    fn end_point(&self, end: LineEnd, line: &Line, i2c: &Matrix) -> Endpoint {
        match self.binding(end) {
            Some(obstacle) => Endpoint::Obstacle(obstacle),
            None => Endpoint::Point(i2c.transform_point(line.end(end).pos)),
        }
    }

    /// Grows or shrinks the connector list to `count`.
    fn resize(&mut self, count: usize, router: &mut Router) -> Result<()> {
        while self.connectors.len() < count {
            self.connectors.push(router.create_connector());
        }
        while self.connectors.len() > count {
            if let Some(conn) = self.connectors.pop() {
                router.delete_connector(conn)?;
            }
        }
        Ok(())
    }

    fn push_geometry(&mut self, line: &Line, i2c: &Matrix, router: &mut Router) -> Result<()> {
        let checkpoints = i2c.transform_points(&line.checkpoints());
        let count = match self.layout {
            ConnectorLayout::PerSegment => checkpoints.len() + 1,
            ConnectorLayout::Single => 1,
        };
        self.resize(count, router)?;

        let head = self.end_point(LineEnd::Head, line, i2c);
        let tail = self.end_point(LineEnd::Tail, line, i2c);

        match self.layout {
            ConnectorLayout::PerSegment => {
                let last = self.connectors.len() - 1;
                for (k, conn) in self.connectors.iter().enumerate() {
                    let source = if k == 0 {
                        head
                    } else {
                        Endpoint::Point(checkpoints[k - 1])
                    };
                    let dest = if k == last {
                        tail
                    } else {
                        Endpoint::Point(checkpoints[k])
                    };
                    router.set_source_endpoint(*conn, source)?;
                    router.set_dest_endpoint(*conn, dest)?;
                    router.set_checkpoints(*conn, Vec::new())?;
                }
            }
            ConnectorLayout::Single => {
                let conn = self.connectors[0];
                router.set_source_endpoint(conn, head)?;
                router.set_dest_endpoint(conn, tail)?;
                router.set_checkpoints(conn, checkpoints)?;
            }
        }
        Ok(())
    }

    /// Joins the solved routes into one point list in canvas coordinates,
    /// flagging the points that are checkpoints. `None` until every
    /// connector has been routed.
    fn assemble(&self, router: &Router) -> Result<Option<Vec<(Point, bool)>>> {
        let mut points: Vec<(Point, bool)> = Vec::new();
        match self.layout {
            ConnectorLayout::PerSegment => {
                for conn in &self.connectors {
                    let route = router.display_route(*conn)?;
                    if route.is_empty() {
                        return Ok(None);
                    }
                    match points.last_mut() {
                        Some(junction) => {
                            junction.1 = true;
                            points.extend(route[1..].iter().map(|p| (*p, false)));
                        }
                        None => points.extend(route.iter().map(|p| (*p, false))),
                    }
                }
            }
            ConnectorLayout::Single => {
                let Some(conn) = self.connectors.first().copied() else {
                    return Ok(None);
                };
                let route = router.display_route(conn)?;
                if route.is_empty() {
                    return Ok(None);
                }
                // Echoed checkpoints appear in the route in submission order.
                let echoed = router.checkpoints(conn)?;
                let mut next = 0;
                let n = route.len();
                for (i, p) in route.iter().enumerate() {
                    let hit = i > 0
                        && i + 1 < n
                        && echoed
                            .get(next)
                            .is_some_and(|c| c.approx_eq(p, EPSILON));
                    if hit {
                        next += 1;
                    }
                    points.push((*p, hit));
                }
            }
        }
        Ok(Some(points))
    }

    /// Moves a bound end to where the route leaves the obstacle outline.
    ///
    /// The router starts a bound end inside the obstacle, so the route is
    /// walked away from that end until a segment crosses the outline. Route
    /// points before the crossing are inside the obstacle and are dropped.
    /// The walk never passes a checkpoint.
    fn project_end(&self, points: &mut Vec<(Point, bool)>, end: LineEnd, router: &Router) {
        let Some(polygon) = self
            .binding(end)
            .and_then(|obstacle| router.obstacle_polygon(obstacle))
        else {
            return;
        };
        if points.len() < 2 {
            return;
        }
        if end == LineEnd::Tail {
            points.reverse();
        }
        project_from_head(points, polygon);
        if end == LineEnd::Tail {
            points.reverse();
        }
    }
}

fn project_from_head(points: &mut Vec<(Point, bool)>, polygon: &[Point]) {
    for i in 0..points.len() - 1 {
        if let Some(p) = first_polygon_crossing(points[i].0, points[i + 1].0, polygon) {
            points[0].0 = p;
            points.drain(1..=i);
            return;
        }
        if points[i + 1].1 {
            return;
        }
    }
}

impl RouterSync for ConnectorAdapter {
    fn sync_to_router(&mut self, kind: &ItemKind, i2c: &Matrix, router: &mut Router) -> Result<()> {
        let ItemKind::Line(line) = kind else {
            return Err(CanvasError::NotALine(self.item));
        };
        self.push_geometry(line, i2c, router)
    }

    fn sync_from_router(
        &mut self,
        kind: &mut ItemKind,
        c2i: &Matrix,
        router: &Router,
    ) -> Result<bool> {
        let ItemKind::Line(line) = kind else {
            return Err(CanvasError::NotALine(self.item));
        };
        let Some(mut points) = self.assemble(router)? else {
            return Ok(false);
        };
        self.project_end(&mut points, LineEnd::Head, router);
        self.project_end(&mut points, LineEnd::Tail, router);

        let points: Vec<(Point, bool)> = points
            .into_iter()
            .map(|(p, checkpoint)| (c2i.transform_point(p), checkpoint))
            .collect();
        line.reconcile(&points)
    }

    fn teardown(&mut self, router: &mut Router) -> Result<()> {
        for conn in self.connectors.drain(..) {
            router.delete_connector(conn)?;
        }
        tracing::debug!(item = %self.item, "Line detached from router");
        Ok(())
    }
}
