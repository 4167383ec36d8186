//! Plain geometry types shared by the store, the controller and the overlay.
//!
//! Points are used for both image-space and display-space coordinates; which
//! one a value lives in is always stated by the function that produces it.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to this point.
    pub fn offset_from(&self, origin: Point) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }

    /// Both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Displacement of a label anchor from its annotation centroid.
///
/// Stored offsets are always in image-space units; the overlay converts them
/// to display units with the current view transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    /// No displacement; the label sits on its centroid.
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    /// Create an offset.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Exactly zero in both components.
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Both components are finite.
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        self.offset_from(rhs)
    }
}

/// An axis-aligned rectangle in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_minus_point_is_offset() {
        let d = Point::new(10.0, 4.0) - Point::new(3.0, 6.0);
        assert_eq!(d, Offset::new(7.0, -2.0));
        assert_eq!(Point::new(3.0, 6.0) + d, Point::new(10.0, 4.0));
    }

    #[test]
    fn test_offset_default_is_zero() {
        assert!(Offset::default().is_zero());
        assert!(!Offset::new(0.0, -1.0).is_zero());
        assert!(!Offset::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_rect_center_and_edges() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.center(), Point::new(30.0, 50.0));
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 80.0);
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert!(r.contains(&Point::new(50.0, 15.0)));
        assert!(r.contains(&Point::new(10.0, 10.0)));
        assert!(r.contains(&Point::new(110.0, 30.0)));
        assert!(!r.contains(&Point::new(9.9, 15.0)));
        assert!(!r.contains(&Point::new(50.0, 30.1)));
    }

    #[test]
    fn test_rect_expand() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0).expand(2.0);
        assert_eq!(r, Rect::new(8.0, 8.0, 14.0, 14.0));
        assert!(r.contains(&Point::new(21.5, 9.0)));
    }
}
