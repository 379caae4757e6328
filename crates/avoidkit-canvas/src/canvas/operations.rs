//! Item manipulation operations for Canvas.

use avoidkit_core::{Matrix, Point, Rectangle};

use super::Canvas;
use crate::adapter::{ConnectorAdapter, RouterAdapter, RouterSync, ShapeAdapter};
use crate::commands::CanvasCommand;
use crate::connections::Connection;
use crate::error::{CanvasError, Result};
use crate::item::{Element, HandleId, Item, ItemId, ItemKind, Line};

impl Canvas {
    /// Adds an item under `parent` (or at the top level) and registers it
    /// with the router.
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        parent: Option<ItemId>,
        matrix: Matrix,
    ) -> Result<ItemId> {
        let i2c = match parent {
            Some(p) => matrix.then(&self.matrix_i2c(p)?),
            None => matrix,
        };
        let id = ItemId(self.next_id);

        let adapter = match &kind {
            ItemKind::Element(element) => RouterAdapter::Shape(ShapeAdapter::attach(
                id,
                element,
                &i2c,
                self.settings.shape_margin,
                &mut self.router,
            )?),
            ItemKind::Line(line) => RouterAdapter::Connector(ConnectorAdapter::attach(
                id,
                line,
                &i2c,
                self.settings.connector_layout,
                &mut self.router,
            )?),
        };

        self.next_id += 1;
        let mut item = Item::new(id, parent, matrix, kind);
        item.adapter = Some(adapter);
        self.items.insert(id, item);
        self.dirty.insert(id);
        tracing::debug!(item = %id, parent = ?parent, "Item added");
        Ok(id)
    }

    /// Adds a top level box covering `rect` in canvas coordinates.
    pub fn add_element(&mut self, rect: Rectangle) -> Result<ItemId> {
        let element = Element::new(rect.width, rect.height);
        self.add_item(
            ItemKind::Element(element),
            None,
            Matrix::translation(rect.x, rect.y),
        )
    }

    /// Adds a top level line through `points`.
    pub fn add_line(&mut self, points: &[Point]) -> Result<ItemId> {
        let line = Line::from_points(points)?;
        self.add_item(ItemKind::Line(line), None, Matrix::identity())
    }

    /// Replaces the item's matrix. The item and its descendants are
    /// re-synced on the next update.
    pub fn set_matrix(&mut self, id: ItemId, matrix: Matrix) -> Result<()> {
        self.item_mut(id)?.matrix = matrix;
        self.dirty.insert(id);
        Ok(())
    }

    /// Moves a handle to `pos` in item coordinates and returns the command
    /// that moves it back.
    ///
    /// An interior line handle that is moved becomes a checkpoint. Moving an
    /// element corner keeps the element rectangular and at least its
    /// minimum size.
    pub fn move_handle(
        &mut self,
        id: ItemId,
        handle: HandleId,
        pos: Point,
    ) -> Result<CanvasCommand> {
        self.set_handle(id, handle, pos, None)
    }

    fn set_handle(
        &mut self,
        id: ItemId,
        handle: HandleId,
        pos: Point,
        checkpoint: Option<bool>,
    ) -> Result<CanvasCommand> {
        let item = self.item_mut(id)?;
        let unknown = CanvasError::UnknownHandle { item: id, handle };
        let inverse = match &mut item.kind {
            ItemKind::Element(element) => {
                let index = element.handle_index(handle).ok_or(unknown)?;
                let old = element.corner(index).unwrap_or_default();
                element.set_corner(index, pos);
                CanvasCommand::MoveHandle {
                    item: id,
                    handle,
                    to: old,
                    checkpoint: false,
                }
            }
            ItemKind::Line(line) => {
                let index = line.handle_index(handle).ok_or(unknown)?;
                let old = line.handles()[index];
                line.set_position(index, pos);
                line.set_checkpoint(index, checkpoint.unwrap_or(true));
                CanvasCommand::MoveHandle {
                    item: id,
                    handle,
                    to: old.pos,
                    checkpoint: old.checkpoint,
                }
            }
        };
        self.dirty.insert(id);
        Ok(inverse)
    }

    /// Splits a line segment into `count` parts. The new handles are
    /// checkpoints so the next route keeps them.
    pub fn split_segment(
        &mut self,
        id: ItemId,
        segment: usize,
        count: usize,
    ) -> Result<Vec<HandleId>> {
        let item = self.item_mut(id)?;
        let ItemKind::Line(line) = &mut item.kind else {
            return Err(CanvasError::NotALine(id));
        };
        let ids = line
            .split_segment(segment, count)
            .ok_or(CanvasError::InvalidSegment { item: id, segment })?;
        for handle in &ids {
            if let Some(index) = line.handle_index(*handle) {
                line.set_checkpoint(index, true);
            }
        }
        self.dirty.insert(id);
        tracing::debug!(item = %id, segment, count, "Line segment split");
        Ok(ids)
    }

    /// Removes an item and its descendants.
    ///
    /// Every connection touching a removed item is disconnected first, then
    /// the router objects are deleted.
    pub fn remove_item(&mut self, id: ItemId) -> Result<()> {
        self.item_ref(id)?;
        let subtree = self.subtree(id);

        for target in &subtree {
            let records: Vec<Connection> = self.connections.involving(*target).cloned().collect();
            for record in records {
                self.disconnect(record)?;
            }
        }

        for target in subtree.iter().rev() {
            let Some(mut item) = self.items.remove(target) else {
                continue;
            };
            if let Some(adapter) = item.adapter.as_mut() {
                adapter.teardown(&mut self.router)?;
            }
            self.dirty.remove(target);
            self.redraw.remove(target);
            tracing::debug!(item = %target, "Item removed");
        }
        Ok(())
    }

    /// `id` followed by all of its descendants, parents before children.
    fn subtree(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            out.extend(self.children(out[i]));
            i += 1;
        }
        out
    }

    /// Applies a command and returns its inverse.
    pub fn apply(&mut self, command: CanvasCommand) -> Result<CanvasCommand> {
        tracing::debug!(command = command.name(), item = %command.item(), "Applying command");
        match command {
            CanvasCommand::Connect(connection) => self.connect(connection),
            CanvasCommand::Disconnect(connection) => self.disconnect(connection),
            CanvasCommand::MoveHandle {
                item,
                handle,
                to,
                checkpoint,
            } => self.set_handle(item, handle, to, Some(checkpoint)),
        }
    }
}
