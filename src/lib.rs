//! Draggable annotation labels for zoomable image viewers.
//!
//! Users grab the name label of an annotated region and drop it somewhere
//! more legible. The displacement is kept per annotation in image-space
//! units, mirrored into the annotation's metadata, and applied on every
//! repaint so the label follows its region through pan, zoom and rotation.
//!
//! The host viewer is reached only through the traits in [`host`].

pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod offset_store;
pub mod overlay;
pub mod plugin;
pub mod text_metrics;
pub mod view_transform;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, LabelConfig, LogLevel};
pub use drag::{DragController, DragState, EventStatus, PointerButton, PointerEvent};
pub use error::OffsetError;
pub use geometry::{Offset, Point, Rect};
pub use host::{
    AnnotationId, CursorStyle, LabeledAnnotation, MetadataBag, MetadataValue, OverlayId,
    ViewerHost,
};
pub use offset_store::{OFFSET_X_KEY, OFFSET_Y_KEY, OffsetStore};
pub use overlay::{LABEL_OVERLAY_ID, LabelCanvas, LabelLayout, LabelRenderer, LabelStyle};
pub use plugin::{DraggableLabels, EXTENSION_DESCRIPTION, EXTENSION_NAME, LabelCommand};
pub use text_metrics::TextMetrics;
pub use view_transform::ViewTransform;
