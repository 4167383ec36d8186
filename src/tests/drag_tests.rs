//! Whole drag gestures under various view transforms.

use super::approx_offset;
use super::mock_host::{MockAnnotation, MockViewer};
use crate::drag::{DragController, EventStatus, PointerEvent};
use crate::geometry::{Offset, Point};
use crate::offset_store::OffsetStore;
use crate::overlay::{LabelRenderer, label_anchor};
use crate::view_transform::ViewTransform;

struct Harness {
    viewer: MockViewer,
    store: OffsetStore,
    renderer: LabelRenderer,
    controller: DragController,
}

impl Harness {
    fn new(transform: ViewTransform, annotations: Vec<MockAnnotation>) -> Self {
        Self {
            viewer: MockViewer::new(transform, annotations),
            store: OffsetStore::new(),
            renderer: LabelRenderer::default(),
            controller: DragController::new(),
        }
    }

    fn send(&mut self, event: PointerEvent) -> EventStatus {
        self.controller
            .handle_event(&mut self.viewer, &mut self.store, &self.renderer, event)
    }

    /// A display point comfortably inside the label of annotation `id`.
    fn grab_point(&self, id: u64) -> Point {
        let layout = self
            .renderer
            .layout(&self.viewer, &self.store)
            .into_iter()
            .find(|l| l.annotation == id)
            .expect("label is laid out");
        layout.bounds.center()
    }

    /// Press at `from`, move through `path`, release at the last point.
    fn gesture(&mut self, from: Point, path: &[Point]) {
        let status = self.send(PointerEvent::press(from.x, from.y));
        assert_eq!(status, EventStatus::Consumed);
        for p in path {
            let status = self.send(PointerEvent::moved(p.x, p.y));
            assert_eq!(status, EventStatus::Consumed);
        }
        let last = path.last().copied().unwrap_or(from);
        let status = self.send(PointerEvent::release(last.x, last.y));
        assert_eq!(status, EventStatus::Consumed);
    }
}

fn wobbly_path(start: Point, end: Point, steps: usize) -> Vec<Point> {
    (1..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let wobble = if i < steps { (i as f64 * 1.7).sin() * 3.3 } else { 0.0 };
            Point::new(
                start.x + (end.x - start.x) * t + wobble,
                start.y + (end.y - start.y) * t - wobble,
            )
        })
        .collect()
}

#[test]
fn test_drag_total_equals_end_minus_start_in_image_units() {
    let transforms = [
        ViewTransform::identity(),
        ViewTransform::from_pan_zoom(0.25, -300.0, 120.0),
        ViewTransform::from_pan_zoom(3.0, 40.0, 40.0),
        ViewTransform::from_pan_zoom_rotation(0.7, 0.5, 200.0, -50.0),
    ];

    for transform in transforms {
        let tumor = MockAnnotation::new(1, "Tumor", 400.0, 300.0);
        let mut h = Harness::new(transform, vec![tumor]);
        let p0 = h.grab_point(1);
        let pn = Point::new(p0.x + 83.0, p0.y - 41.5);

        h.gesture(p0, &wobbly_path(p0, pn, 37));

        let expected = transform.unapply_vector(pn - p0).unwrap();
        assert!(
            approx_offset(h.store.get(1), expected),
            "{:?}: got {:?}, expected {:?}",
            transform,
            h.store.get(1),
            expected
        );
        assert!(!h.controller.is_dragging());
    }
}

#[test]
fn test_second_drag_continues_from_previous_offset() {
    let transform = ViewTransform::from_pan_zoom(2.0, 0.0, 0.0);
    let tumor = MockAnnotation::new(1, "Tumor", 100.0, 100.0);
    let mut h = Harness::new(transform, vec![tumor]);

    let p0 = h.grab_point(1);
    h.gesture(p0, &[Point::new(p0.x + 20.0, p0.y)]);
    assert!(approx_offset(h.store.get(1), Offset::new(10.0, 0.0)));

    let p1 = h.grab_point(1);
    h.gesture(p1, &[Point::new(p1.x, p1.y + 40.0)]);
    assert!(approx_offset(h.store.get(1), Offset::new(10.0, 20.0)));
}

#[test]
fn test_label_follows_anchor_after_zoom_and_pan() {
    let transform = ViewTransform::from_pan_zoom(1.0, 0.0, 0.0);
    let centroid = Point::new(200.0, 150.0);
    let tumor = MockAnnotation::new(1, "Tumor", centroid.x, centroid.y);
    let mut h = Harness::new(transform, vec![tumor]);

    let p0 = h.grab_point(1);
    h.gesture(p0, &[Point::new(p0.x + 30.0, p0.y + 10.0)]);
    let offset = h.store.get(1);

    let zoomed = transform
        .zoom_about(4.0, Point::new(90.0, 60.0))
        .pan_by(-250.0, 33.0);
    h.viewer.transform = Some(zoomed);

    let layout = h.renderer.layout(&h.viewer, &h.store).remove(0);
    let expected = zoomed.apply(centroid + offset);
    assert!((layout.anchor.x - expected.x).abs() < 1e-9);
    assert!((layout.anchor.y - expected.y).abs() < 1e-9);
    assert_eq!(layout.anchor, label_anchor(&zoomed, centroid, offset));

    // The label is still grabbable at its new place
    let grab = layout.bounds.center();
    let status = h.send(PointerEvent::press(grab.x, grab.y));
    assert_eq!(status, EventStatus::Consumed);
    assert_eq!(h.controller.dragged_annotation(), Some(1));
}

#[test]
fn test_hit_test_matches_rendered_box() {
    let transform = ViewTransform::from_pan_zoom_rotation(1.5, -0.4, 80.0, 20.0);
    let mut h = Harness::new(
        transform,
        vec![
            MockAnnotation::new(1, "Stroma", 100.0, 100.0),
            MockAnnotation::new(2, "Necrosis", 400.0, 50.0),
        ],
    );
    h.store
        .set(&mut h.viewer.annotations[0], Offset::new(-12.0, 30.0));

    let layouts = h.renderer.layout(&h.viewer, &h.store);
    for layout in &layouts {
        let r = layout.bounds;
        let inside = [
            r.center(),
            Point::new(r.x + 0.5, r.y + 0.5),
            Point::new(r.right() - 0.5, r.bottom() - 0.5),
        ];
        for p in inside {
            h.send(PointerEvent::press(p.x, p.y));
            assert_eq!(h.controller.dragged_annotation(), Some(layout.annotation));
            h.send(PointerEvent::release(p.x, p.y));
        }
    }

    for p in [Point::new(-500.0, -500.0), Point::new(5000.0, 5000.0)] {
        assert_eq!(h.send(PointerEvent::press(p.x, p.y)), EventStatus::Ignored);
        assert!(!h.controller.is_dragging());
    }
}

#[test]
fn test_overlapping_labels_pick_first_in_enumeration_order() {
    let mut h = Harness::new(
        ViewTransform::identity(),
        vec![
            MockAnnotation::new(9, "Upper", 100.0, 100.0),
            MockAnnotation::new(2, "Lower", 101.0, 100.0),
        ],
    );
    let p = Point::new(100.5, 95.0);
    h.send(PointerEvent::press(p.x, p.y));
    assert_eq!(h.controller.dragged_annotation(), Some(9));
}

#[test]
fn test_only_dragged_annotation_moves() {
    let mut h = Harness::new(
        ViewTransform::identity(),
        vec![
            MockAnnotation::new(1, "A", 100.0, 100.0),
            MockAnnotation::new(2, "B", 400.0, 400.0),
        ],
    );
    let p0 = h.grab_point(2);
    h.gesture(p0, &[Point::new(p0.x - 15.0, p0.y - 15.0)]);

    assert_eq!(h.store.get(1), Offset::ZERO);
    assert!(approx_offset(h.store.get(2), Offset::new(-15.0, -15.0)));
    assert!(!h.store.contains(1));
}

#[test]
fn test_press_during_drag_restarts_cleanly() {
    let mut h = Harness::new(
        ViewTransform::identity(),
        vec![MockAnnotation::new(1, "A", 100.0, 100.0)],
    );
    let p0 = h.grab_point(1);
    h.send(PointerEvent::press(p0.x, p0.y));
    h.send(PointerEvent::moved(p0.x + 10.0, p0.y));

    // Release was lost; a press far away must not keep dragging
    let status = h.send(PointerEvent::press(900.0, 900.0));
    assert_eq!(status, EventStatus::Ignored);
    assert!(!h.controller.is_dragging());
    assert!(approx_offset(h.store.get(1), Offset::new(10.0, 0.0)));
}
