//! Scene items: boxes (elements) and lines made of handles.

mod element;
mod line;

pub use element::{Element, MIN_SIZE, NE, NW, SE, SW};
pub use line::{Line, LineEnd};

use avoidkit_core::{Matrix, Point};
use std::fmt;

use crate::adapter::RouterAdapter;

/// Canvas-wide item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Handle identifier, unique within its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// A named anchor point of an item, in item coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    pub pos: Point,
    /// Whether a connection may be recorded for this handle.
    pub connectable: bool,
    pub movable: bool,
    /// Interior line handle the router must route through.
    pub checkpoint: bool,
}

impl Handle {
    pub fn new(id: HandleId, pos: Point) -> Self {
        Self {
            id,
            pos,
            connectable: false,
            movable: true,
            checkpoint: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Element(Element),
    Line(Line),
}

impl ItemKind {
    pub fn handles(&self) -> &[Handle] {
        match self {
            ItemKind::Element(e) => e.handles(),
            ItemKind::Line(l) => l.handles(),
        }
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles().iter().find(|h| h.id == id)
    }
}

/// An item placed on a canvas.
///
/// `matrix` maps item coordinates into the parent's coordinates (the canvas
/// for top level items). Items attached to a routed canvas carry a
/// [`RouterAdapter`] that mirrors their geometry into the router.
#[derive(Debug)]
pub struct Item {
    id: ItemId,
    parent: Option<ItemId>,
    pub(crate) matrix: Matrix,
    pub(crate) kind: ItemKind,
    pub(crate) adapter: Option<RouterAdapter>,
}

impl Item {
    pub(crate) fn new(id: ItemId, parent: Option<ItemId>, matrix: Matrix, kind: ItemKind) -> Self {
        Self {
            id,
            parent,
            matrix,
            kind,
            adapter: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn as_line(&self) -> Option<&Line> {
        match &self.kind {
            ItemKind::Line(line) => Some(line),
            ItemKind::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            ItemKind::Element(element) => Some(element),
            ItemKind::Line(_) => None,
        }
    }

    pub fn adapter(&self) -> Option<&RouterAdapter> {
        self.adapter.as_ref()
    }
}
