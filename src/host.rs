//! Capability traits implemented by the host viewer.
//!
//! The crate never sees concrete host classes. A viewer exposes its active
//! view transform, its annotations in a stable enumeration order, and a few
//! hooks for overlays, pointer routing, cursors and repaints. Annotations
//! expose identity, name, centroid and a metadata bag.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OffsetError;
use crate::geometry::Point;
use crate::view_transform::ViewTransform;

/// Unique identifier for an annotation, assigned by the host.
pub type AnnotationId = u64;

/// A primitive value stored in an annotation's metadata.
///
/// Hosts may coerce numbers to strings (or back) when saving projects, so
/// readers must accept either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Numeric value
    Number(f64),
    /// Text value, possibly holding a number
    Text(String),
}

impl MetadataValue {
    /// Read the value as a finite number. `key` is only used for error reporting.
    pub fn parse_finite(&self, key: &str) -> Result<f64, OffsetError> {
        let value = match self {
            MetadataValue::Number(n) => *n,
            MetadataValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| OffsetError::malformed(key, s.as_str()))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(OffsetError::NonFinite {
                key: key.to_string(),
                value,
            })
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Number(n) => write!(f, "{}", n),
            MetadataValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

/// String-keyed store of primitive values attached to an annotation.
pub trait MetadataBag {
    /// Value stored under `key`.
    fn get_value(&self, key: &str) -> Option<MetadataValue>;

    /// Store `value` under `key`, replacing any previous value.
    fn put_value(&mut self, key: &str, value: MetadataValue);

    /// Remove `key`, returning its previous value.
    fn remove_value(&mut self, key: &str) -> Option<MetadataValue>;
}

/// Hosts that keep string-only attributes get numbers written in their
/// shortest round-trip decimal form.
impl MetadataBag for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<MetadataValue> {
        self.get(key).map(|s| MetadataValue::Text(s.clone()))
    }

    fn put_value(&mut self, key: &str, value: MetadataValue) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove_value(&mut self, key: &str) -> Option<MetadataValue> {
        self.remove(key).map(MetadataValue::Text)
    }
}

impl MetadataBag for HashMap<String, MetadataValue> {
    fn get_value(&self, key: &str) -> Option<MetadataValue> {
        self.get(key).cloned()
    }

    fn put_value(&mut self, key: &str, value: MetadataValue) {
        self.insert(key.to_string(), value);
    }

    fn remove_value(&mut self, key: &str) -> Option<MetadataValue> {
        self.remove(key)
    }
}

/// An annotation as seen by the label feature. Lifecycle is owned by the host.
pub trait LabeledAnnotation {
    /// Metadata storage of the host's annotation type.
    type Metadata: MetadataBag;

    /// Stable identity within the open image.
    fn id(&self) -> AnnotationId;

    /// The name shown on the label. `None` or empty means no label.
    fn display_name(&self) -> Option<&str>;

    /// Centroid of the region in image space. `None` means no geometry.
    fn centroid(&self) -> Option<Point>;

    /// Metadata attached to this annotation.
    fn metadata(&self) -> &Self::Metadata;

    /// Mutable metadata attached to this annotation.
    fn metadata_mut(&mut self) -> &mut Self::Metadata;

    /// Name and centroid, if this annotation carries a label at all.
    fn label_anchor(&self) -> Option<(&str, Point)> {
        let name = self.display_name().filter(|name| !name.is_empty())?;
        let centroid = self.centroid().filter(Point::is_finite)?;
        Some((name, centroid))
    }
}

/// Identifies an overlay registered with the host's overlay stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub &'static str);

/// Pointer cursor requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Whatever the host normally shows
    #[default]
    Default,
    /// Shown while a label is being dragged
    Move,
}

/// The host viewer a label session is attached to.
pub trait ViewerHost {
    /// The host's annotation type.
    type Annotation: LabeledAnnotation;

    /// Current image-to-display transform, or `None` when no image is open.
    fn view_transform(&self) -> Option<ViewTransform>;

    /// All annotations of the open image, in the host's enumeration order.
    ///
    /// The order is part of the hit-testing contract: when label boxes
    /// overlap, the earliest annotation wins.
    fn annotations(&self) -> impl Iterator<Item = &Self::Annotation>;

    /// Mutable access to all annotations, in the same order as [`Self::annotations`].
    fn annotations_mut(&mut self) -> impl Iterator<Item = &mut Self::Annotation>;

    /// Annotation with the given id, if it still exists.
    fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Self::Annotation> {
        self.annotations_mut()
            .find(|annotation| annotation.id() == id)
    }

    /// Register an overlay whose paint callback the host will invoke.
    fn add_overlay(&mut self, overlay: OverlayId);

    /// Unregister an overlay. Unknown ids are ignored.
    fn remove_overlay(&mut self, overlay: OverlayId);

    /// Start or stop routing pointer press/move/release events to the session.
    fn set_pointer_listener(&mut self, listening: bool);

    /// Change the pointer cursor over the viewer.
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Schedule a repaint. Multiple requests before the next paint collapse.
    fn request_repaint(&mut self);
}
