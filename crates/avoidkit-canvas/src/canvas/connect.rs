//! Connection management for Canvas.
//!
//! Connect and disconnect are exact inverses: each returns the other as a
//! [`CanvasCommand`] carrying the same [`Connection`] record.

use super::Canvas;
use crate::adapter::RouterAdapter;
use crate::commands::CanvasCommand;
use crate::connections::{Connection, ConstraintId};
use crate::error::{CanvasError, Result};
use crate::item::{HandleId, ItemId, LineEnd};

impl Canvas {
    /// Connects endpoint `handle` of line `item` to port `port` of element
    /// `connected`.
    pub fn connect_item(
        &mut self,
        item: ItemId,
        handle: HandleId,
        connected: ItemId,
        port: usize,
        constraint: Option<ConstraintId>,
    ) -> Result<CanvasCommand> {
        let mut connection = Connection::new(item, handle, connected, port);
        connection.constraint = constraint;
        self.connect(connection)
    }

    /// Records `connection` and binds the router endpoint of the handle
    /// (source for the head, destination for the tail) to the target's
    /// obstacle. Nothing changes if the handle is already connected.
    pub fn connect(&mut self, connection: Connection) -> Result<CanvasCommand> {
        let (item, handle) = (connection.item, connection.handle);
        let end = self.line_end(item, handle)?;
        if self.connections.get(item, handle).is_some() {
            return Err(CanvasError::DuplicateConnection { item, handle });
        }

        let target = self.element(connection.connected)?;
        if connection.port >= target.ports().len() {
            return Err(CanvasError::InvalidPort {
                item: connection.connected,
                port: connection.port,
            });
        }
        let obstacle = self.obstacle(connection.connected)?;

        let adapter = self
            .items
            .get_mut(&item)
            .and_then(|i| i.adapter.as_mut())
            .and_then(RouterAdapter::as_connector_mut)
            .ok_or(CanvasError::NotRouted(item))?;
        adapter.bind(end, obstacle, &mut self.router)?;

        self.connections.insert(connection.clone())?;
        self.dirty.insert(item);
        tracing::debug!(
            item = %item,
            handle = %handle,
            connected = %connection.connected,
            port = connection.port,
            "Handle connected"
        );
        Ok(CanvasCommand::Disconnect(connection))
    }

    /// Disconnects whatever `handle` of `item` is connected to.
    pub fn disconnect_item(&mut self, item: ItemId, handle: HandleId) -> Result<CanvasCommand> {
        let record = self
            .connections
            .get(item, handle)
            .cloned()
            .ok_or(CanvasError::NotConnected { item, handle })?;
        self.disconnect(record)
    }

    /// Removes `connection`, which must match the recorded one, and frees
    /// the router endpoint at the handle's current canvas position. The
    /// completion callback runs last.
    pub fn disconnect(&mut self, connection: Connection) -> Result<CanvasCommand> {
        let (item, handle) = (connection.item, connection.handle);
        let recorded = self
            .connections
            .get(item, handle)
            .is_some_and(|r| r.same_binding(&connection));
        if !recorded {
            return Err(CanvasError::NotConnected { item, handle });
        }

        let end = self.line_end(item, handle)?;
        let at = self
            .matrix_i2c(item)?
            .transform_point(self.line(item)?.end(end).pos);

        let adapter = self
            .items
            .get_mut(&item)
            .and_then(|i| i.adapter.as_mut())
            .and_then(RouterAdapter::as_connector_mut)
            .ok_or(CanvasError::NotRouted(item))?;
        adapter.unbind(end, at, &mut self.router)?;

        let removed = self
            .connections
            .remove(item, handle)
            .ok_or(CanvasError::NotConnected { item, handle })?;
        self.dirty.insert(item);
        tracing::debug!(
            item = %item,
            handle = %handle,
            connected = %removed.connected,
            "Handle disconnected"
        );

        if let Some(callback) = connection.callback.as_ref().or(removed.callback.as_ref()) {
            callback.call(&removed);
        }
        Ok(CanvasCommand::Connect(removed))
    }

    /// The endpoint at the other end of the line from `handle`.
    pub fn opposite(&self, item: ItemId, handle: HandleId) -> Result<HandleId> {
        self.line_end(item, handle)?;
        self.line(item)?
            .opposite(handle)
            .map(|h| h.id)
            .ok_or(CanvasError::InvalidHandle { item, handle })
    }

    fn line_end(&self, item: ItemId, handle: HandleId) -> Result<LineEnd> {
        let line = self.line(item)?;
        if line.handle_index(handle).is_none() {
            return Err(CanvasError::UnknownHandle { item, handle });
        }
        line.end_of(handle)
            .ok_or(CanvasError::InvalidHandle { item, handle })
    }
}
