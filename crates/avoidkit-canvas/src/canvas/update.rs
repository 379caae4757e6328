//! The update cycle: scene to router, one solve, router to scene.

use std::collections::BTreeSet;

use avoidkit_router::ConnRef;

use super::{Canvas, UpdateStats};
use crate::adapter::RouterSync;
use crate::error::{CanvasError, Result};
use crate::item::ItemId;

impl Canvas {
    /// Runs one update pass.
    ///
    /// 1. Extends the dirty set with descendants of dirty items and lines
    ///    connected to dirty elements.
    /// 2. Pushes every dirty item into the router.
    /// 3. Solves exactly once.
    /// 4. Delivers the changed routes, once per affected line.
    ///
    /// A failing delivery is logged and leaves that line as it was; it is
    /// never returned. Errors while pushing geometry are returned before the
    /// solve and the dirty set is kept for the next pass.
    pub fn update_now(&mut self) -> Result<UpdateStats> {
        let dirty = self.collect_dirty();
        let mut stats = UpdateStats::default();

        for id in &dirty {
            let i2c = self.matrix_i2c(*id)?;
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            if let Some(adapter) = item.adapter.as_mut() {
                adapter.sync_to_router(&item.kind, &i2c, &mut self.router)?;
                stats.synced += 1;
            }
        }
        self.dirty.clear();

        stats.routes_changed = self.router.solve();

        let affected: BTreeSet<ItemId> = self
            .routes
            .drain()
            .into_iter()
            .filter_map(|update| self.owner_of(update.conn))
            .collect();

        for id in affected {
            match self.deliver(id) {
                Ok(true) => stats.lines_updated += 1,
                Ok(false) => {}
                Err(e) => {
                    stats.failed += 1;
                    let err = CanvasError::RouterCallback {
                        item: id,
                        reason: e.to_string(),
                    };
                    tracing::error!(item = %id, "{}", err);
                }
            }
            self.redraw.insert(id);
        }
        self.redraw.extend(dirty);

        tracing::debug!(
            synced = stats.synced,
            routes_changed = stats.routes_changed,
            lines_updated = stats.lines_updated,
            failed = stats.failed,
            "Canvas update finished"
        );
        Ok(stats)
    }

    fn collect_dirty(&self) -> BTreeSet<ItemId> {
        let mut dirty: BTreeSet<ItemId> = self
            .dirty
            .iter()
            .copied()
            .filter(|id| self.items.contains_key(id))
            .collect();

        let mut stack: Vec<ItemId> = dirty.iter().copied().collect();
        while let Some(id) = stack.pop() {
            for child in self.children(id) {
                if dirty.insert(child) {
                    stack.push(child);
                }
            }
        }

        let elements: Vec<ItemId> = dirty
            .iter()
            .copied()
            .filter(|id| self.element(*id).is_ok())
            .collect();
        for element in elements {
            dirty.extend(self.connections.connected_to(element));
        }
        dirty
    }

    fn owner_of(&self, conn: ConnRef) -> Option<ItemId> {
        let owner = self
            .items
            .values()
            .find(|item| item.adapter().is_some_and(|a| a.owns(conn)))
            .map(|item| item.id());
        if owner.is_none() {
            tracing::debug!(conn = %conn, "Route update for a connector without an item");
        }
        owner
    }

    fn deliver(&mut self, id: ItemId) -> Result<bool> {
        let c2i = self.matrix_c2i(id)?;
        let item = self
            .items
            .get_mut(&id)
            .ok_or(CanvasError::UnknownItem(id))?;
        let Some(adapter) = item.adapter.as_mut() else {
            return Ok(false);
        };
        adapter.sync_from_router(&mut item.kind, &c2i, &self.router)
    }
}
