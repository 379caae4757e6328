//! Reversible canvas commands.
//!
//! Every mutating canvas operation that can be undone returns its inverse
//! as a [`CanvasCommand`]. Applying that command through
//! [`Canvas::apply`](crate::Canvas::apply) undoes the operation and returns
//! the command that redoes it.

use avoidkit_core::Point;

use crate::connections::Connection;
use crate::item::{HandleId, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    /// Record the connection and bind the router endpoint.
    Connect(Connection),
    /// Exact inverse of `Connect`, carrying the same record.
    Disconnect(Connection),
    /// Put a handle at `to` (item coordinates). For interior line handles
    /// `checkpoint` restores the flag as well.
    MoveHandle {
        item: ItemId,
        handle: HandleId,
        to: Point,
        checkpoint: bool,
    },
}

impl CanvasCommand {
    /// Returns the name of the command for display.
    pub fn name(&self) -> &str {
        match self {
            CanvasCommand::Connect(_) => "Connect",
            CanvasCommand::Disconnect(_) => "Disconnect",
            CanvasCommand::MoveHandle { .. } => "Move Handle",
        }
    }

    /// The item the command changes.
    pub fn item(&self) -> ItemId {
        match self {
            CanvasCommand::Connect(c) | CanvasCommand::Disconnect(c) => c.item,
            CanvasCommand::MoveHandle { item, .. } => *item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let c = Connection::new(ItemId(1), HandleId(0), ItemId(2), 0);
        assert_eq!(CanvasCommand::Connect(c.clone()).name(), "Connect");
        assert_eq!(CanvasCommand::Disconnect(c).item(), ItemId(1));
        let m = CanvasCommand::MoveHandle {
            item: ItemId(4),
            handle: HandleId(1),
            to: Point::new(1.0, 2.0),
            checkpoint: true,
        };
        assert_eq!(m.name(), "Move Handle");
        assert_eq!(m.item(), ItemId(4));
    }
}
