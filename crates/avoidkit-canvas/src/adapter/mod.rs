//! Router synchronization for scene items.
//!
//! Every item attached to a routed canvas owns one adapter. The adapter is
//! the only code that touches the item's router objects: it pushes the
//! item's geometry into the router before a solve and, for lines, pulls the
//! computed route back into the item's handles afterwards.

mod connector;
mod shape;

pub use connector::ConnectorAdapter;
pub use shape::ShapeAdapter;
pub(crate) use shape::canvas_outline;

use avoidkit_core::Matrix;
use avoidkit_router::{ConnRef, ObstacleRef, Router};

use crate::error::Result;
use crate::item::ItemKind;

/// The router-facing side of a scene item.
pub trait RouterSync {
    /// Pushes the item's current geometry into the router. `i2c` maps item
    /// coordinates to canvas (router) coordinates.
    fn sync_to_router(&mut self, kind: &ItemKind, i2c: &Matrix, router: &mut Router) -> Result<()>;

    /// Pulls solved routes back into the item. `c2i` maps canvas
    /// coordinates to item coordinates. Returns whether the item changed.
    ///
    /// Runs after the solve pass has finished and must not call
    /// [`Router::solve`].
    fn sync_from_router(
        &mut self,
        kind: &mut ItemKind,
        c2i: &Matrix,
        router: &Router,
    ) -> Result<bool>;

    /// Deletes every router object owned by the adapter.
    fn teardown(&mut self, router: &mut Router) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouterAdapter {
    Shape(ShapeAdapter),
    Connector(ConnectorAdapter),
}

impl RouterAdapter {
    pub fn obstacle(&self) -> Option<ObstacleRef> {
        match self {
            RouterAdapter::Shape(shape) => Some(shape.obstacle()),
            RouterAdapter::Connector(_) => None,
        }
    }

    pub fn connectors(&self) -> &[ConnRef] {
        match self {
            RouterAdapter::Shape(_) => &[],
            RouterAdapter::Connector(connector) => connector.connectors(),
        }
    }

    pub fn owns(&self, conn: ConnRef) -> bool {
        self.connectors().contains(&conn)
    }

    pub(crate) fn as_connector_mut(&mut self) -> Option<&mut ConnectorAdapter> {
        match self {
            RouterAdapter::Connector(connector) => Some(connector),
            RouterAdapter::Shape(_) => None,
        }
    }

    fn inner(&mut self) -> &mut dyn RouterSync {
        match self {
            RouterAdapter::Shape(shape) => shape as &mut dyn RouterSync,
            RouterAdapter::Connector(connector) => connector,
        }
    }
}

impl RouterSync for RouterAdapter {
    fn sync_to_router(&mut self, kind: &ItemKind, i2c: &Matrix, router: &mut Router) -> Result<()> {
        self.inner().sync_to_router(kind, i2c, router)
    }

    fn sync_from_router(
        &mut self,
        kind: &mut ItemKind,
        c2i: &Matrix,
        router: &Router,
    ) -> Result<bool> {
        self.inner().sync_from_router(kind, c2i, router)
    }

    fn teardown(&mut self, router: &mut Router) -> Result<()> {
        self.inner().teardown(router)
    }
}
