//! Connection records between line endpoints and elements.

use std::fmt;
use std::sync::Arc;

use crate::error::{CanvasError, Result};
use crate::item::{HandleId, ItemId};

/// Caller-supplied constraint attached to a connection. The canvas only
/// stores it and hands it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub u64);

/// Called with the removed record once a disconnect completes.
#[derive(Clone)]
pub struct DisconnectCallback(Arc<dyn Fn(&Connection) + Send + Sync>);

impl DisconnectCallback {
    pub fn new(f: impl Fn(&Connection) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, connection: &Connection) {
        (self.0)(connection)
    }
}

impl PartialEq for DisconnectCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DisconnectCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisconnectCallback")
    }
}

/// Records that `handle` of line `item` is bound to port `port` of
/// `connected`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub item: ItemId,
    pub handle: HandleId,
    pub connected: ItemId,
    pub port: usize,
    pub constraint: Option<ConstraintId>,
    pub callback: Option<DisconnectCallback>,
}

impl Connection {
    pub fn new(item: ItemId, handle: HandleId, connected: ItemId, port: usize) -> Self {
        Self {
            item,
            handle,
            connected,
            port,
            constraint: None,
            callback: None,
        }
    }

    pub fn with_constraint(mut self, constraint: ConstraintId) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_callback(mut self, callback: DisconnectCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Whether `other` names the same binding: same handle, same target
    /// item, port and constraint.
    pub fn same_binding(&self, other: &Connection) -> bool {
        self.item == other.item
            && self.handle == other.handle
            && self.connected == other.connected
            && self.port == other.port
            && self.constraint == other.constraint
    }

    pub fn involves(&self, item: ItemId) -> bool {
        self.item == item || self.connected == item
    }
}

/// Every connection on a canvas, at most one per handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionTable {
    records: Vec<Connection>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: ItemId, handle: HandleId) -> Option<&Connection> {
        self.records
            .iter()
            .find(|c| c.item == item && c.handle == handle)
    }

    pub(crate) fn insert(&mut self, connection: Connection) -> Result<()> {
        if self.get(connection.item, connection.handle).is_some() {
            return Err(CanvasError::DuplicateConnection {
                item: connection.item,
                handle: connection.handle,
            });
        }
        self.records.push(connection);
        Ok(())
    }

    pub(crate) fn remove(&mut self, item: ItemId, handle: HandleId) -> Option<Connection> {
        let index = self
            .records
            .iter()
            .position(|c| c.item == item && c.handle == handle)?;
        Some(self.records.remove(index))
    }

    /// Connections where `item` is either the line or the target.
    pub fn involving(&self, item: ItemId) -> impl Iterator<Item = &Connection> + '_ {
        self.records.iter().filter(move |c| c.involves(item))
    }

    /// Lines connected to `item`.
    pub fn connected_to(&self, item: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        self.records
            .iter()
            .filter(move |c| c.connected == item)
            .map(|c| c.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
