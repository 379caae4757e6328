//! Points, rectangles and polygons in a single shared coordinate space.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Tolerance used for floating point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Closed, ordered outline. Box outlines always have exactly four points.
pub type Polygon = SmallVec<[Point; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `t` along the segment from `self` to `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis aligned rectangle. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Builds the rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn x1(&self) -> f64 {
        self.x + self.width
    }

    pub fn y1(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expand(&mut self, margin: f64) {
        self.x -= margin;
        self.y -= margin;
        self.width += 2.0 * margin;
        self.height += 2.0 * margin;
    }

    pub fn expanded(mut self, margin: f64) -> Self {
        self.expand(margin);
        self
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x1() && p.y >= self.y && p.y <= self.y1()
    }

    /// Corners in outline winding order: NE, SE, SW, NW.
    pub fn outline(&self) -> Polygon {
        let (x0, y0, x1, y1) = (self.x, self.y, self.x1(), self.y1());
        smallvec::smallvec![
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(x0, y0),
        ]
    }
}

/// Bounding rectangle of a set of points.
pub fn polygon_bounds(points: &[Point]) -> Rectangle {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if points.is_empty() {
        return Rectangle::default();
    }
    Rectangle::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

/// Centre of the polygon's bounding rectangle.
pub fn polygon_center(points: &[Point]) -> Point {
    polygon_bounds(points).center()
}

fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Intersection point of segments `a0-a1` and `b0-b1`, endpoints included.
///
/// Parallel and collinear segments never intersect.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let r = Point::new(a1.x - a0.x, a1.y - a0.y);
    let s = Point::new(b1.x - b0.x, b1.y - b0.y);
    let denom = cross(r, s);
    if denom.abs() < EPSILON {
        return None;
    }
    let qp = Point::new(b0.x - a0.x, b0.y - a0.y);
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    let range = -EPSILON..=1.0 + EPSILON;
    if range.contains(&t) && range.contains(&u) {
        Some(a0.lerp(&a1, t))
    } else {
        None
    }
}

/// First point where the segment `start-end` crosses an edge of `polygon`.
///
/// Edges are tested in winding order (`p0-p1`, `p1-p2`, ..., `pn-p0`) and
/// the first hit wins.
pub fn first_polygon_crossing(start: Point, end: Point, polygon: &[Point]) -> Option<Point> {
    let n = polygon.len();
    if n < 2 {
        return None;
    }
    (0..n).find_map(|i| segment_intersection(start, end, polygon[i], polygon[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_from_corners_normalizes() {
        let r = Rectangle::from_corners(Point::new(10.0, 10.0), Point::new(0.0, 5.0));
        assert_eq!(r, Rectangle::new(0.0, 5.0, 10.0, 5.0));
    }

    #[test]
    fn test_rectangle_outline_winding() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let outline: Vec<Point> = r.outline().into_iter().collect();
        assert_eq!(
            outline,
            vec![
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_rectangle_expand() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0).expanded(5.0);
        assert_eq!(r, Rectangle::new(-5.0, -5.0, 20.0, 20.0));
        assert_eq!(r.x1(), 15.0);
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let p = segment_intersection(
            Point::new(5.0, 5.0),
            Point::new(60.0, 5.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        )
        .unwrap();
        assert!(p.approx_eq(&Point::new(10.0, 5.0), EPSILON));
    }

    #[test]
    fn test_segment_intersection_misses_and_parallel() {
        assert!(segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, -1.0),
            Point::new(10.0, 1.0),
        )
        .is_none());
        assert!(segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_first_polygon_crossing_uses_winding_order() {
        let outline = Rectangle::new(0.0, 0.0, 10.0, 10.0).outline();
        // Leaves through the SE corner, shared by the first two edges.
        let p = first_polygon_crossing(Point::new(5.0, 5.0), Point::new(15.0, 15.0), &outline)
            .unwrap();
        assert!(p.approx_eq(&Point::new(10.0, 10.0), 1e-9));

        let p = first_polygon_crossing(Point::new(5.0, 5.0), Point::new(5.0, -20.0), &outline)
            .unwrap();
        assert!(p.approx_eq(&Point::new(5.0, 0.0), 1e-9));
    }

    #[test]
    fn test_polygon_center() {
        let outline = Rectangle::new(0.0, 0.0, 10.0, 20.0).outline();
        assert_eq!(polygon_center(&outline), Point::new(5.0, 10.0));
        assert_eq!(polygon_bounds(&[]), Rectangle::default());
    }
}
