//! Cross-module scenarios: a mock viewer driven through whole drag
//! gestures, session lifecycles and metadata round-trips.


mod drag_tests;

/// Tolerance for comparing offsets that went through a view transform.
pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn approx_offset(a: crate::Offset, b: crate::Offset) -> bool {
    (a.dx - b.dx).abs() < EPSILON && (a.dy - b.dy).abs() < EPSILON
}
