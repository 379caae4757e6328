//! Box-like items: four corner handles that always form a rectangle.

use avoidkit_core::{Point, Polygon, Rectangle};

use super::{Handle, HandleId};

/// Corner indices, clockwise from the top left.
pub const NW: usize = 0;
pub const NE: usize = 1;
pub const SE: usize = 2;
pub const SW: usize = 3;

/// Default minimum width and height.
pub const MIN_SIZE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    handles: [Handle; 4],
    min_width: f64,
    min_height: f64,
}

impl Element {
    /// Creates an element spanning `(0, 0)` to `(width, height)` in item
    /// coordinates, grown to the minimum size if needed.
    pub fn new(width: f64, height: f64) -> Self {
        let handles = [0u64, 1, 2, 3].map(|i| Handle::new(HandleId(i), Point::default()));
        let mut element = Self {
            handles,
            min_width: MIN_SIZE,
            min_height: MIN_SIZE,
        };
        element.set_rect(Rectangle::new(
            0.0,
            0.0,
            width.max(MIN_SIZE),
            height.max(MIN_SIZE),
        ));
        element
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn corner(&self, index: usize) -> Option<Point> {
        self.handles.get(index).map(|h| h.pos)
    }

    pub fn handle_index(&self, id: HandleId) -> Option<usize> {
        self.handles.iter().position(|h| h.id == id)
    }

    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Changes the minimum size and grows the element to honour it.
    pub fn set_min_size(&mut self, min_width: f64, min_height: f64) {
        self.min_width = min_width.max(0.0);
        self.min_height = min_height.max(0.0);
        let r = self.rect();
        self.set_rect(Rectangle::new(
            r.x,
            r.y,
            r.width.max(self.min_width),
            r.height.max(self.min_height),
        ));
    }

    /// The rectangle spanned by the corner handles.
    pub fn rect(&self) -> Rectangle {
        Rectangle::from_corners(self.handles[NW].pos, self.handles[SE].pos)
    }

    pub fn width(&self) -> f64 {
        self.rect().width
    }

    pub fn height(&self) -> f64 {
        self.rect().height
    }

    fn set_rect(&mut self, r: Rectangle) {
        self.handles[NW].pos = Point::new(r.x, r.y);
        self.handles[NE].pos = Point::new(r.x1(), r.y);
        self.handles[SE].pos = Point::new(r.x1(), r.y1());
        self.handles[SW].pos = Point::new(r.x, r.y1());
    }

    /// Moves one corner while the opposite corner stays put.
    ///
    /// The adjacent corners follow so the handles remain a rectangle, and
    /// the moved corner is clamped so neither side drops below the minimum.
    /// Returns `false` for an unknown corner index.
    pub fn set_corner(&mut self, index: usize, pos: Point) -> bool {
        if index > SW {
            return false;
        }
        let anchor = self.handles[(index + 2) % 4].pos;
        let x = if index == NW || index == SW {
            pos.x.min(anchor.x - self.min_width)
        } else {
            pos.x.max(anchor.x + self.min_width)
        };
        let y = if index == NW || index == NE {
            pos.y.min(anchor.y - self.min_height)
        } else {
            pos.y.max(anchor.y + self.min_height)
        };
        self.set_rect(Rectangle::from_corners(Point::new(x, y), anchor));
        true
    }

    /// Ports are the four sides: NW-NE, NE-SE, SE-SW and SW-NW.
    pub fn ports(&self) -> [(Point, Point); 4] {
        let p = |i: usize| self.handles[i].pos;
        [(p(NW), p(NE)), (p(NE), p(SE)), (p(SE), p(SW)), (p(SW), p(NW))]
    }

    /// Outline in item coordinates, grown by `margin`, in NE, SE, SW, NW
    /// order.
    pub fn outline(&self, margin: f64) -> Polygon {
        self.rect().expanded(margin).outline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_respects_min_size() {
        let e = Element::new(4.0, 30.0);
        assert_eq!(e.width(), MIN_SIZE);
        assert_eq!(e.height(), 30.0);
        assert_eq!(e.corner(SE), Some(Point::new(10.0, 30.0)));
    }

    #[test]
    fn test_set_corner_keeps_rectangle() {
        let mut e = Element::new(20.0, 20.0);
        assert!(e.set_corner(SE, Point::new(50.0, 40.0)));
        assert_eq!(e.rect(), Rectangle::new(0.0, 0.0, 50.0, 40.0));
        assert_eq!(e.corner(NE), Some(Point::new(50.0, 0.0)));
        assert_eq!(e.corner(SW), Some(Point::new(0.0, 40.0)));
    }

    #[test]
    fn test_set_corner_clamps_to_min_size() {
        let mut e = Element::new(20.0, 20.0);
        e.set_corner(NW, Point::new(19.0, 25.0));
        assert_eq!(e.rect(), Rectangle::new(10.0, 10.0, 10.0, 10.0));
        assert_eq!(e.corner(SE), Some(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_unknown_corner_is_rejected() {
        let mut e = Element::new(20.0, 20.0);
        assert!(!e.set_corner(4, Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_outline_with_margin() {
        let e = Element::new(10.0, 10.0);
        let outline: Vec<Point> = e.outline(2.0).into_iter().collect();
        assert_eq!(
            outline,
            vec![
                Point::new(12.0, -2.0),
                Point::new(12.0, 12.0),
                Point::new(-2.0, 12.0),
                Point::new(-2.0, -2.0),
            ]
        );
    }

    #[test]
    fn test_raising_min_size_grows_element() {
        let mut e = Element::new(10.0, 10.0);
        e.set_min_size(25.0, 15.0);
        assert_eq!(e.width(), 25.0);
        assert_eq!(e.height(), 15.0);
    }
}
