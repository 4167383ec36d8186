//! Per-annotation label offsets.
//!
//! The store is an in-memory cache in front of each annotation's metadata:
//! every write goes straight through to the two reserved keys, and a fresh
//! store is rebuilt from those keys with [`OffsetStore::hydrate`].

use std::collections::HashMap;

use crate::error::OffsetError;
use crate::geometry::Offset;
use crate::host::{AnnotationId, LabeledAnnotation, MetadataBag, MetadataValue};

/// Metadata key for the horizontal offset. Stable across versions.
pub const OFFSET_X_KEY: &str = "draggable_label_offset_x";

/// Metadata key for the vertical offset. Stable across versions.
pub const OFFSET_Y_KEY: &str = "draggable_label_offset_y";

/// Read a persisted offset from a metadata bag.
///
/// Returns `Ok(None)` when neither key is present.
pub fn read_offset<M: MetadataBag + ?Sized>(
    metadata: &M,
) -> Result<Option<Offset>, OffsetError> {
    match (
        metadata.get_value(OFFSET_X_KEY),
        metadata.get_value(OFFSET_Y_KEY),
    ) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(OffsetError::partial(OFFSET_X_KEY, OFFSET_Y_KEY)),
        (None, Some(_)) => Err(OffsetError::partial(OFFSET_Y_KEY, OFFSET_X_KEY)),
        (Some(x), Some(y)) => {
            let dx = x.parse_finite(OFFSET_X_KEY)?;
            let dy = y.parse_finite(OFFSET_Y_KEY)?;
            Ok(Some(Offset::new(dx, dy)))
        }
    }
}

/// Write both offset components into a metadata bag.
pub fn write_offset<M: MetadataBag + ?Sized>(metadata: &mut M, offset: Offset) {
    metadata.put_value(OFFSET_X_KEY, MetadataValue::Number(offset.dx));
    metadata.put_value(OFFSET_Y_KEY, MetadataValue::Number(offset.dy));
}

/// Remove both offset keys, leaving all other metadata untouched.
pub fn clear_offset<M: MetadataBag + ?Sized>(metadata: &mut M) {
    metadata.remove_value(OFFSET_X_KEY);
    metadata.remove_value(OFFSET_Y_KEY);
}

/// Mapping from annotation identity to label offset.
///
/// Absence of an entry means the zero offset.
#[derive(Debug, Clone, Default)]
pub struct OffsetStore {
    offsets: HashMap<AnnotationId, Offset>,
}

impl OffsetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored offset for `id`, or zero.
    pub fn get(&self, id: AnnotationId) -> Offset {
        self.offsets.get(&id).copied().unwrap_or(Offset::ZERO)
    }

    /// Whether `id` has an explicit offset in memory.
    pub fn contains(&self, id: AnnotationId) -> bool {
        self.offsets.contains_key(&id)
    }

    /// Number of annotations with an explicit offset.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether no annotation has an explicit offset.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Overwrite the offset of `annotation` and mirror it into its metadata.
    ///
    /// Non-finite offsets are rejected and nothing is written. Returns whether
    /// the offset was stored. Does not request a repaint.
    pub fn set<A: LabeledAnnotation + ?Sized>(
        &mut self,
        annotation: &mut A,
        offset: Offset,
    ) -> bool {
        if !offset.is_finite() {
            log::warn!(
                "Refusing non-finite label offset ({}, {}) for annotation {}",
                offset.dx,
                offset.dy,
                annotation.id()
            );
            return false;
        }

        self.offsets.insert(annotation.id(), offset);
        write_offset(annotation.metadata_mut(), offset);
        true
    }

    /// Forget the offset of `annotation` and delete its metadata keys.
    pub fn reset<A: LabeledAnnotation + ?Sized>(&mut self, annotation: &mut A) {
        self.offsets.remove(&annotation.id());
        clear_offset(annotation.metadata_mut());
    }

    /// Reset every given annotation and drop the whole in-memory cache.
    ///
    /// Returns the number of annotations that had an offset in memory or in
    /// metadata.
    pub fn reset_all<'a, A, I>(&mut self, annotations: I) -> usize
    where
        A: LabeledAnnotation + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        let mut cleared = 0;
        for annotation in annotations {
            let had_entry = self.offsets.contains_key(&annotation.id());
            let metadata = annotation.metadata_mut();
            let had_x = metadata.remove_value(OFFSET_X_KEY).is_some();
            let had_y = metadata.remove_value(OFFSET_Y_KEY).is_some();
            if had_entry || had_x || had_y {
                cleared += 1;
            }
        }
        self.offsets.clear();
        log::debug!("Reset {} label offsets", cleared);
        cleared
    }

    /// Populate the cache from the metadata of `annotations`.
    ///
    /// Malformed or partial pairs are logged and treated as absent. Returns
    /// the number of offsets loaded.
    pub fn hydrate<'a, A, I>(&mut self, annotations: I) -> usize
    where
        A: LabeledAnnotation + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        let mut loaded = 0;
        for annotation in annotations {
            match read_offset(annotation.metadata()) {
                Ok(Some(offset)) => {
                    self.offsets.insert(annotation.id(), offset);
                    loaded += 1;
                }
                Ok(None) => {
                    self.offsets.remove(&annotation.id());
                }
                Err(e) => {
                    log::warn!(
                        "Ignoring persisted label offset for annotation {}: {}",
                        annotation.id(),
                        e
                    );
                    self.offsets.remove(&annotation.id());
                }
            }
        }
        log::debug!("Hydrated {} label offsets from metadata", loaded);
        loaded
    }

    /// Drop the in-memory cache without touching metadata.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}
