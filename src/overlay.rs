//! Label layout and painting.
//!
//! Layout is computed fresh from the host's annotations on every paint and
//! on every pointer press, through the same function, so a label is always
//! grabbable exactly where it was last drawn.

use crate::geometry::{Offset, Point, Rect};
use crate::host::{AnnotationId, LabeledAnnotation, OverlayId, ViewerHost};
use crate::offset_store::OffsetStore;
use crate::text_metrics::TextMetrics;
use crate::view_transform::ViewTransform;

/// Identifier of the label overlay in the host's overlay stack.
pub const LABEL_OVERLAY_ID: OverlayId = OverlayId("draggable-labels");

/// Neighbour directions used to draw the contrast outline.
const OUTLINE_DIRECTIONS: [(f64, f64); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Visual parameters shared by layout, hit-testing and painting.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    /// Font metrics used to size label boxes
    pub metrics: TextMetrics,
    /// Extra display pixels around a label box that still count as a hit
    pub hit_margin: f64,
    /// Draw an 8-neighbour outline under the text
    pub outline: bool,
    /// Outline offset in display pixels
    pub outline_width: f64,
    /// RGB text color
    pub fill_color: [u8; 3],
    /// RGB outline color
    pub outline_color: [u8; 3],
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            hit_margin: 2.0,
            outline: true,
            outline_width: 1.0,
            fill_color: [255, 255, 255],
            outline_color: [0, 0, 0],
        }
    }
}

/// Display position of a label anchored at `centroid` and displaced by `offset`.
///
/// Equal to `transform(centroid) + linear(transform)(offset)`.
pub fn label_anchor(transform: &ViewTransform, centroid: Point, offset: Offset) -> Point {
    transform.apply(centroid) + transform.apply_vector(offset)
}

/// Where one label sits on screen for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Annotation the label belongs to
    pub annotation: AnnotationId,
    /// Label text
    pub text: String,
    /// Display-space anchor: horizontal centre of the text, on its baseline
    pub anchor: Point,
    /// Estimated display-space text box
    pub bounds: Rect,
}

impl LabelLayout {
    /// Lay out `text` centred on `anchor`.
    pub fn new(annotation: AnnotationId, text: &str, anchor: Point, metrics: &TextMetrics) -> Self {
        let width = metrics.line_width(text);
        let bounds = Rect::new(
            anchor.x - width / 2.0,
            anchor.y - metrics.ascent(),
            width,
            metrics.line_height(),
        );
        Self {
            annotation,
            text: text.to_string(),
            anchor,
            bounds,
        }
    }

    /// Left end of the baseline, where text drawing starts.
    pub fn text_origin(&self) -> Point {
        Point::new(self.bounds.x, self.anchor.y)
    }

    /// Whether `point` lies in the box grown by `margin`, edges included.
    pub fn hit(&self, point: &Point, margin: f64) -> bool {
        self.bounds.expand(margin).contains(point)
    }
}

/// Lay out every labelled annotation of `viewer`, in enumeration order.
///
/// Annotations without a name or geometry are skipped, as are labels whose
/// anchor is not finite. No image open means no labels.
pub fn layout_labels<V: ViewerHost>(
    viewer: &V,
    store: &OffsetStore,
    metrics: &TextMetrics,
) -> Vec<LabelLayout> {
    let Some(transform) = viewer.view_transform() else {
        return Vec::new();
    };

    viewer
        .annotations()
        .filter_map(|annotation| {
            let (name, centroid) = annotation.label_anchor()?;
            let anchor = label_anchor(&transform, centroid, store.get(annotation.id()));
            anchor
                .is_finite()
                .then(|| LabelLayout::new(annotation.id(), name, anchor, metrics))
        })
        .collect()
}

/// First label (in layout order) whose box, grown by `margin`, contains `point`.
pub fn hit_test<'a>(
    layouts: &'a [LabelLayout],
    point: &Point,
    margin: f64,
) -> Option<&'a LabelLayout> {
    layouts.iter().find(|layout| layout.hit(point, margin))
}

/// Drawing surface provided by the host's paint callback.
///
/// Coordinates are display space. Clipping is the surface's job.
pub trait LabelCanvas {
    /// Draw one line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: [u8; 3]);
}

/// Paints annotation labels at their offset positions.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer {
    style: LabelStyle,
}

impl LabelRenderer {
    /// Create a renderer with the given style.
    pub fn new(style: LabelStyle) -> Self {
        Self { style }
    }

    /// Current style.
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Replace the style. Takes effect on the next layout.
    pub fn set_style(&mut self, style: LabelStyle) {
        self.style = style;
    }

    /// Lay out the current frame with this renderer's metrics.
    pub fn layout<V: ViewerHost>(&self, viewer: &V, store: &OffsetStore) -> Vec<LabelLayout> {
        layout_labels(viewer, store, &self.style.metrics)
    }

    /// Label under a display-space point, using the same layout as painting.
    pub fn label_at<V: ViewerHost>(
        &self,
        viewer: &V,
        store: &OffsetStore,
        point: &Point,
    ) -> Option<LabelLayout> {
        let layouts = self.layout(viewer, store);
        hit_test(&layouts, point, self.style.hit_margin).cloned()
    }

    /// Paint every label. Returns the number of labels drawn.
    pub fn paint<V: ViewerHost, C: LabelCanvas + ?Sized>(
        &self,
        viewer: &V,
        store: &OffsetStore,
        canvas: &mut C,
    ) -> usize {
        let layouts = self.layout(viewer, store);
        for layout in &layouts {
            self.paint_label(layout, canvas);
        }
        layouts.len()
    }

    fn paint_label<C: LabelCanvas + ?Sized>(&self, layout: &LabelLayout, canvas: &mut C) {
        let origin = layout.text_origin();
        if self.style.outline {
            let w = self.style.outline_width;
            for (dx, dy) in OUTLINE_DIRECTIONS {
                canvas.draw_text(
                    &layout.text,
                    origin + Offset::new(dx * w, dy * w),
                    self.style.outline_color,
                );
            }
        }
        canvas.draw_text(&layout.text, origin, self.style.fill_color);
    }
}
