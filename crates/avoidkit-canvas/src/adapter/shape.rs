//! Keeps one router obstacle in step with an element's outline.

use avoidkit_core::{Matrix, Point, Polygon};
use avoidkit_router::{ObstacleRef, Router};

use super::RouterSync;
use crate::error::{CanvasError, Result};
use crate::item::{Element, ItemId, ItemKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeAdapter {
    item: ItemId,
    obstacle: ObstacleRef,
    margin: f64,
}

impl ShapeAdapter {
    /// Registers the element's outline, grown by `margin`, as a new obstacle.
    pub fn attach(
        item: ItemId,
        element: &Element,
        i2c: &Matrix,
        margin: f64,
        router: &mut Router,
    ) -> Result<Self> {
        let polygon = canvas_outline(element, i2c, margin);
        let obstacle = router.create_obstacle(&polygon)?;
        tracing::debug!(item = %item, obstacle = %obstacle, "Shape attached to router");
        Ok(Self {
            item,
            obstacle,
            margin,
        })
    }

    pub fn obstacle(&self) -> ObstacleRef {
        self.obstacle
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

/// The element's outline in canvas coordinates, NE, SE, SW, NW.
pub(crate) fn canvas_outline(element: &Element, i2c: &Matrix, margin: f64) -> Polygon {
    element
        .outline(margin)
        .iter()
        .map(|p: &Point| i2c.transform_point(*p))
        .collect()
}

impl RouterSync for ShapeAdapter {
    fn sync_to_router(&mut self, kind: &ItemKind, i2c: &Matrix, router: &mut Router) -> Result<()> {
        let ItemKind::Element(element) = kind else {
            return Err(CanvasError::NotAnElement(self.item));
        };
        let polygon = canvas_outline(element, i2c, self.margin);
        router.move_obstacle(self.obstacle, &polygon)?;
        Ok(())
    }

    fn sync_from_router(
        &mut self,
        _kind: &mut ItemKind,
        _c2i: &Matrix,
        _router: &Router,
    ) -> Result<bool> {
        Ok(false)
    }

    fn teardown(&mut self, router: &mut Router) -> Result<()> {
        router.delete_obstacle(self.obstacle)?;
        tracing::debug!(item = %self.item, obstacle = %self.obstacle, "Shape detached from router");
        Ok(())
    }
}
