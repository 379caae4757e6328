//! Affine transforms between item space and canvas space.
//!
//! Every scene item carries a [`Matrix`] relative to its parent. The canvas
//! composes those into an item-to-canvas (`i2c`) matrix; its inverse is the
//! canvas-to-item (`c2i`) matrix used when router output flows back into
//! the scene.

use lyon::geom::euclid::default::Transform2D;
use lyon::geom::euclid::{point2, Angle};

use crate::error::{GeometryError, Result};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(Transform2D<f64>);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn identity() -> Self {
        Self(Transform2D::identity())
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self(Transform2D::translation(dx, dy))
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(Transform2D::scale(sx, sy))
    }

    pub fn rotation(radians: f64) -> Self {
        Self(Transform2D::rotation(Angle::radians(radians)))
    }

    /// Translates in the matrix's local space, so the offset is applied
    /// before any existing scale or rotation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.0 = Transform2D::translation(dx, dy).then(&self.0);
    }

    /// Returns a matrix applying `self` first and `next` second.
    pub fn then(&self, next: &Matrix) -> Matrix {
        Self(self.0.then(&next.0))
    }

    pub fn inverse(&self) -> Result<Matrix> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(GeometryError::SingularMatrix)
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let q = self.0.transform_point(point2(p.x, p.y));
        Point::new(q.x, q.y)
    }

    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.transform_point(*p)).collect()
    }
}
