//! Canvas holding the scene items and the router they are mirrored into.

mod connect;
mod operations;
mod types;
mod update;

pub use types::UpdateStats;

use std::collections::{BTreeMap, BTreeSet};

use avoidkit_core::{Matrix, Point, Polygon, RoutingPenalty, RoutingType};
use avoidkit_router::{ObstacleRef, RouteReceiver, Router, RoutingEngine, RoutingParameters};
use avoidkit_settings::RouterSettings;

use crate::adapter::canvas_outline;
use crate::connections::{Connection, ConnectionTable};
use crate::error::{CanvasError, Result};
use crate::item::{Element, HandleId, Item, ItemId, Line};

/// The routed canvas.
///
/// Owns every item, the single [`Router`] and the connection table. Edits
/// mark items dirty; [`Canvas::update_now`] pushes the dirty items into the
/// router, solves once and writes the new routes back into the lines.
#[derive(Debug)]
pub struct Canvas {
    items: BTreeMap<ItemId, Item>,
    next_id: u64,
    router: Router,
    routes: RouteReceiver,
    connections: ConnectionTable,
    settings: RouterSettings,
    dirty: BTreeSet<ItemId>,
    redraw: BTreeSet<ItemId>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates a canvas with the default router settings.
    pub fn new() -> Self {
        Self::build(RouterSettings::default(), Router::new)
    }

    /// Creates a canvas whose router is configured from `settings`.
    pub fn with_settings(settings: RouterSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(settings, Router::new))
    }

    /// Like [`Canvas::with_settings`], but routes with `engine`.
    pub fn with_engine(
        settings: RouterSettings,
        engine: Box<dyn RoutingEngine>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(settings, |routing_type| {
            Router::with_engine(engine, RoutingParameters::new(routing_type))
        }))
    }

    fn build(
        settings: RouterSettings,
        make_router: impl FnOnce(RoutingType) -> (Router, RouteReceiver),
    ) -> Self {
        let (mut router, routes) = make_router(settings.routing_type);
        for (kind, value) in settings.penalties.iter() {
            router.set_routing_penalty(kind, value);
        }
        router.set_orthogonal_nudge_distance(settings.nudge_distance);
        tracing::debug!(
            routing_type = %settings.routing_type,
            layout = ?settings.connector_layout,
            margin = settings.shape_margin,
            "Canvas router configured"
        );
        Self {
            items: BTreeMap::new(),
            next_id: 1,
            router,
            routes,
            connections: ConnectionTable::new(),
            settings,
            dirty: BTreeSet::new(),
            redraw: BTreeSet::new(),
        }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn set_routing_penalty(&mut self, kind: RoutingPenalty, value: f64) {
        self.router.set_routing_penalty(kind, value);
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Direct children of `id`.
    pub fn children(&self, id: ItemId) -> Vec<ItemId> {
        self.items
            .values()
            .filter(|item| item.parent() == Some(id))
            .map(Item::id)
            .collect()
    }

    fn item_ref(&self, id: ItemId) -> Result<&Item> {
        self.items.get(&id).ok_or(CanvasError::UnknownItem(id))
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items.get_mut(&id).ok_or(CanvasError::UnknownItem(id))
    }

    pub fn line(&self, id: ItemId) -> Result<&Line> {
        self.item_ref(id)?
            .as_line()
            .ok_or(CanvasError::NotALine(id))
    }

    pub fn element(&self, id: ItemId) -> Result<&Element> {
        self.item_ref(id)?
            .as_element()
            .ok_or(CanvasError::NotAnElement(id))
    }

    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    pub fn get_connection(&self, item: ItemId, handle: HandleId) -> Option<&Connection> {
        self.connections.get(item, handle)
    }

    /// The router obstacle mirroring element `id`.
    pub fn obstacle(&self, id: ItemId) -> Result<ObstacleRef> {
        self.item_ref(id)?
            .adapter()
            .and_then(|adapter| adapter.obstacle())
            .ok_or(CanvasError::NotRouted(id))
    }

    /// Item-to-canvas matrix: the item's matrix followed by each ancestor's.
    pub fn matrix_i2c(&self, id: ItemId) -> Result<Matrix> {
        let mut item = self.item_ref(id)?;
        let mut m = item.matrix;
        while let Some(parent) = item.parent() {
            item = self.item_ref(parent)?;
            m = m.then(&item.matrix);
        }
        Ok(m)
    }

    pub fn matrix_c2i(&self, id: ItemId) -> Result<Matrix> {
        Ok(self.matrix_i2c(id)?.inverse()?)
    }

    /// Maps item coordinates of `id` to canvas coordinates.
    pub fn points_i2c(&self, id: ItemId, points: &[Point]) -> Result<Vec<Point>> {
        Ok(self.matrix_i2c(id)?.transform_points(points))
    }

    /// Maps canvas coordinates to item coordinates of `id`.
    pub fn points_c2i(&self, id: ItemId, points: &[Point]) -> Result<Vec<Point>> {
        Ok(self.matrix_c2i(id)?.transform_points(points))
    }

    /// Canvas-space outline of element `id`, grown by the configured margin.
    pub fn outline(&self, id: ItemId) -> Result<Polygon> {
        let element = self.element(id)?;
        Ok(canvas_outline(
            element,
            &self.matrix_i2c(id)?,
            self.settings.shape_margin,
        ))
    }

    /// Handle positions of line `id` in canvas space, head to tail.
    pub fn route_points(&self, id: ItemId) -> Result<Vec<Point>> {
        let line = self.line(id)?;
        self.points_i2c(id, &line.positions())
    }

    /// Marks `id` for the next [`Canvas::update_now`].
    pub fn request_update(&mut self, id: ItemId) -> Result<()> {
        self.item_ref(id)?;
        self.dirty.insert(id);
        Ok(())
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Items that need repainting since the last call.
    pub fn take_redraw_requests(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.redraw).into_iter().collect()
    }
}
