//! Image-space to display-space mathematics.
//!
//! The host viewer owns the actual view state; this module gives it (and the
//! tests) one affine type to express pan, zoom and rotation, plus the inverse
//! mapping needed to turn pointer motion back into image units.

use crate::geometry::{Offset, Point};

/// Determinant magnitude below which a transform is treated as degenerate.
const MIN_DETERMINANT: f64 = 1e-12;

/// Affine transform from image space to display space.
///
/// ```text
/// x' = a * x + c * y + tx
/// y' = b * x + d * y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Linear part, column-major: `a b` is the image x axis, `c d` the y axis
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Display-space translation
    pub tx: f64,
    pub ty: f64,
}

impl ViewTransform {
    /// Create a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Create an identity transform (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Uniform zoom followed by a pan (display-space translation).
    pub fn from_pan_zoom(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self::new(zoom, 0.0, 0.0, zoom, pan_x, pan_y)
    }

    /// Uniform zoom and rotation (radians, clockwise on a y-down display)
    /// followed by a pan.
    pub fn from_pan_zoom_rotation(zoom: f64, rotation: f64, pan_x: f64, pan_y: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self::new(
            zoom * cos,
            zoom * sin,
            -zoom * sin,
            zoom * cos,
            pan_x,
            pan_y,
        )
    }

    /// Map an image-space point to display space.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Map an image-space vector to display space (linear part only).
    pub fn apply_vector(&self, v: Offset) -> Offset {
        Offset::new(self.a * v.dx + self.c * v.dy, self.b * v.dx + self.d * v.dy)
    }

    /// Determinant of the linear part. Zero for a collapsed view.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Uniform-scale equivalent of this transform (display units per image unit).
    pub fn scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    /// Whether display points can be mapped back to image space.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > MIN_DETERMINANT
    }

    /// The display-to-image transform, or `None` when this one is degenerate.
    pub fn inverse(&self) -> Option<ViewTransform> {
        if !self.is_invertible() {
            return None;
        }
        let det = self.determinant();
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        let tx = -(a * self.tx + c * self.ty);
        let ty = -(b * self.tx + d * self.ty);
        Some(ViewTransform::new(a, b, c, d, tx, ty))
    }

    /// Map a display-space point back to image space.
    pub fn unapply(&self, p: Point) -> Option<Point> {
        self.inverse().map(|inv| inv.apply(p))
    }

    /// Map a display-space vector back to image space.
    pub fn unapply_vector(&self, v: Offset) -> Option<Offset> {
        self.inverse().map(|inv| inv.apply_vector(v))
    }

    /// Apply a pan delta (display pixels) to the transform.
    pub fn pan_by(&self, dx: f64, dy: f64) -> ViewTransform {
        ViewTransform {
            tx: self.tx + dx,
            ty: self.ty + dy,
            ..*self
        }
    }

    /// Scale the view by `factor` while keeping the display point `cursor` fixed.
    pub fn zoom_about(&self, factor: f64, cursor: Point) -> ViewTransform {
        ViewTransform::new(
            self.a * factor,
            self.b * factor,
            self.c * factor,
            self.d * factor,
            factor * (self.tx - cursor.x) + cursor.x,
            factor * (self.ty - cursor.y) + cursor.y,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_identity_transform() {
        let t = ViewTransform::identity();
        assert_eq!(t.apply(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn test_pan_zoom_apply() {
        let t = ViewTransform::from_pan_zoom(2.0, 10.0, -5.0);
        assert_eq!(t.apply(Point::new(3.0, 4.0)), Point::new(16.0, 3.0));
        assert_eq!(t.apply_vector(Offset::new(3.0, 4.0)), Offset::new(6.0, 8.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = ViewTransform::from_pan_zoom_rotation(0.25, 0.7, 120.0, -40.0);
        let p = Point::new(1234.5, 987.25);
        let back = t.unapply(t.apply(p)).unwrap();
        assert!(approx_point(back, p));
    }

    #[test]
    fn test_rotation_vector() {
        // Quarter turn: image +x points down the display
        let t = ViewTransform::from_pan_zoom_rotation(1.0, FRAC_PI_2, 0.0, 0.0);
        let v = t.apply_vector(Offset::new(1.0, 0.0));
        assert!(approx_eq(v.dx, 0.0));
        assert!(approx_eq(v.dy, 1.0));
        let back = t.unapply_vector(v).unwrap();
        assert!(approx_eq(back.dx, 1.0));
        assert!(approx_eq(back.dy, 0.0));
    }

    #[test]
    fn test_degenerate_has_no_inverse() {
        let t = ViewTransform::from_pan_zoom(0.0, 5.0, 5.0);
        assert!(t.inverse().is_none());
        assert!(t.unapply(Point::new(1.0, 1.0)).is_none());

        let nan = ViewTransform::from_pan_zoom(f64::NAN, 0.0, 0.0);
        assert!(!nan.is_invertible());
    }

    #[test]
    fn test_zoom_about_preserves_cursor_point() {
        let t = ViewTransform::from_pan_zoom(1.0, 50.0, 30.0);
        let cursor = Point::new(150.0, 120.0);
        let before = t.unapply(cursor).unwrap();

        let zoomed = t.zoom_about(2.0, cursor);
        let after = zoomed.unapply(cursor).unwrap();

        assert!(approx_eq(zoomed.scale(), 2.0));
        assert!(approx_point(before, after));
    }

    #[test]
    fn test_pan_by() {
        let t = ViewTransform::from_pan_zoom(1.0, 10.0, 20.0);
        let new_t = t.pan_by(5.0, -10.0);

        assert_eq!(new_t.scale(), 1.0);
        assert_eq!(new_t.tx, 15.0);
        assert_eq!(new_t.ty, 10.0);
    }
}
