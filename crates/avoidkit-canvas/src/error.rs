//! Error types for the canvas crate.

use avoidkit_core::GeometryError;
use avoidkit_router::RouterError;
use avoidkit_settings::SettingsError;
use thiserror::Error;

use crate::item::{HandleId, ItemId};

/// Errors raised by canvas operations.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The handle already has a connection recorded.
    #[error("Handle {handle} of item {item} is already connected")]
    DuplicateConnection { item: ItemId, handle: HandleId },

    /// The handle is neither the first nor the last handle of its line.
    #[error("Handle {handle} of item {item} is not a line endpoint")]
    InvalidHandle { item: ItemId, handle: HandleId },

    /// No matching connection is recorded.
    #[error("Handle {handle} of item {item} is not connected")]
    NotConnected { item: ItemId, handle: HandleId },

    /// A route update could not be applied to the item.
    #[error("Route update for item {item} failed: {reason}")]
    RouterCallback { item: ItemId, reason: String },

    #[error("Unknown item {0}")]
    UnknownItem(ItemId),

    #[error("Item {item} has no handle {handle}")]
    UnknownHandle { item: ItemId, handle: HandleId },

    #[error("Item {item} has no port {port}")]
    InvalidPort { item: ItemId, port: usize },

    #[error("Line {item} has no segment {segment}")]
    InvalidSegment { item: ItemId, segment: usize },

    #[error("Item {0} is not a line")]
    NotALine(ItemId),

    #[error("Item {0} is not an element")]
    NotAnElement(ItemId),

    /// The item is not registered with the router.
    #[error("Item {0} has no router counterpart")]
    NotRouted(ItemId),

    /// A line needs at least two points.
    #[error("A line needs at least 2 points, got {got}")]
    TooFewPoints { got: usize },

    /// The router echoed a different number of checkpoints than the line has.
    #[error("Line has {expected} checkpoints but the route carries {got}")]
    CheckpointMismatch { expected: usize, got: usize },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type alias for canvas operations.
pub type Result<T> = std::result::Result<T, CanvasError>;
