//! The per-viewer label session.
//!
//! A [`DraggableLabels`] value belongs to exactly one viewer. Enabling it
//! creates the offset store and drag controller for that viewer; disabling
//! drops both. Nothing is shared between viewers.

use crate::config::LabelConfig;
use crate::drag::{DragController, EventStatus, PointerEvent};
use crate::geometry::Offset;
use crate::host::{AnnotationId, ViewerHost};
use crate::offset_store::OffsetStore;
use crate::overlay::{LABEL_OVERLAY_ID, LabelCanvas, LabelRenderer, LabelStyle};

/// Human-readable name of the feature, used as the menu title.
pub const EXTENSION_NAME: &str = "Draggable Labels";

/// One-line description shown next to the extension name.
pub const EXTENSION_DESCRIPTION: &str =
    "Drag annotation labels to reposition them for better visualization";

/// User-invokable commands exposed through the host's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCommand {
    /// Attach the label overlay and start listening for drags
    Enable,
    /// Detach from the viewer
    Disable,
    /// Clear every stored offset for the open image
    ResetAll,
}

impl LabelCommand {
    /// Get the menu label for this command.
    pub fn name(&self) -> &'static str {
        match self {
            LabelCommand::Enable => "Enable draggable labels",
            LabelCommand::Disable => "Disable draggable labels",
            LabelCommand::ResetAll => "Reset all label positions",
        }
    }

    /// All commands in menu order.
    pub fn all() -> &'static [LabelCommand] {
        &[
            LabelCommand::Enable,
            LabelCommand::Disable,
            LabelCommand::ResetAll,
        ]
    }
}

/// State that exists only while the feature is enabled.
#[derive(Debug, Default)]
struct Attachment {
    store: OffsetStore,
    controller: DragController,
}

/// Draggable label feature for one viewer.
#[derive(Debug, Default)]
pub struct DraggableLabels {
    renderer: LabelRenderer,
    attachment: Option<Attachment>,
}

impl DraggableLabels {
    /// Create a disabled session styled from `config`.
    pub fn new(config: &LabelConfig) -> Self {
        Self::with_style(config.style())
    }

    /// Create a disabled session with an explicit style.
    pub fn with_style(style: LabelStyle) -> Self {
        Self {
            renderer: LabelRenderer::new(style),
            attachment: None,
        }
    }

    /// Style used for painting and hit-testing.
    pub fn style(&self) -> &LabelStyle {
        self.renderer.style()
    }

    /// Replace the style, repainting `viewer` if the session is enabled.
    pub fn set_style<V: ViewerHost>(&mut self, viewer: &mut V, style: LabelStyle) {
        self.renderer.set_style(style);
        if self.is_enabled() {
            viewer.request_repaint();
        }
    }

    /// Whether the session is attached to its viewer.
    pub fn is_enabled(&self) -> bool {
        self.attachment.is_some()
    }

    /// Whether a label drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(|attachment| attachment.controller.is_dragging())
    }

    /// Annotation whose label is being dragged, if any.
    pub fn dragged_annotation(&self) -> Option<AnnotationId> {
        self.attachment
            .as_ref()
            .and_then(|attachment| attachment.controller.dragged_annotation())
    }

    /// Current offset of an annotation's label. Zero when disabled.
    pub fn offset_of(&self, id: AnnotationId) -> Offset {
        self.attachment
            .as_ref()
            .map_or(Offset::ZERO, |attachment| attachment.store.get(id))
    }

    /// Attach overlay and pointer handling to `viewer`. Idempotent.
    pub fn enable<V: ViewerHost>(&mut self, viewer: &mut V) {
        if self.is_enabled() {
            log::debug!("Draggable labels already enabled");
            return;
        }

        let mut attachment = Attachment::default();
        let loaded = attachment.store.hydrate(viewer.annotations());
        self.attachment = Some(attachment);

        viewer.add_overlay(LABEL_OVERLAY_ID);
        viewer.set_pointer_listener(true);
        viewer.request_repaint();
        log::info!("Draggable labels enabled ({} saved offsets)", loaded);
    }

    /// Detach from `viewer`, aborting any drag in progress. Idempotent.
    pub fn disable<V: ViewerHost>(&mut self, viewer: &mut V) {
        let Some(mut attachment) = self.attachment.take() else {
            log::debug!("Draggable labels already disabled");
            return;
        };

        if attachment.controller.cancel(viewer) {
            log::debug!("Label drag aborted by disable");
        }
        viewer.set_pointer_listener(false);
        viewer.remove_overlay(LABEL_OVERLAY_ID);
        viewer.request_repaint();
        log::info!("Draggable labels disabled");
    }

    /// Clear every stored offset for the open image.
    ///
    /// No-op when the feature is not enabled or no image is open.
    pub fn reset_all<V: ViewerHost>(&mut self, viewer: &mut V) {
        let Some(attachment) = self.attachment.as_mut() else {
            log::debug!("Reset requested while draggable labels are disabled");
            return;
        };
        if viewer.view_transform().is_none() {
            return;
        }

        attachment.controller.cancel(viewer);
        let cleared = attachment.store.reset_all(viewer.annotations_mut());
        viewer.request_repaint();
        log::info!("Reset {} label positions", cleared);
    }

    /// Clear the offset of a single annotation.
    pub fn reset_label<V: ViewerHost>(&mut self, viewer: &mut V, id: AnnotationId) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };

        if attachment.controller.dragged_annotation() == Some(id) {
            attachment.controller.cancel(viewer);
        }
        let Some(annotation) = viewer.annotation_mut(id) else {
            return;
        };
        attachment.store.reset(annotation);
        viewer.request_repaint();
    }

    /// Dispatch a menu command.
    pub fn run_command<V: ViewerHost>(&mut self, viewer: &mut V, command: LabelCommand) {
        log::debug!("Running command: {}", command.name());
        match command {
            LabelCommand::Enable => self.enable(viewer),
            LabelCommand::Disable => self.disable(viewer),
            LabelCommand::ResetAll => self.reset_all(viewer),
        }
    }

    /// The host switched images: drop cached offsets and reload from the new
    /// annotations. Any drag in progress is aborted.
    pub fn image_changed<V: ViewerHost>(&mut self, viewer: &mut V) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };

        attachment.controller.cancel(viewer);
        attachment.store.clear();
        let loaded = attachment.store.hydrate(viewer.annotations());
        viewer.request_repaint();
        log::debug!("Image changed, reloaded {} label offsets", loaded);
    }

    /// Route a pointer event. Ignored while disabled.
    pub fn handle_pointer<V: ViewerHost>(
        &mut self,
        viewer: &mut V,
        event: PointerEvent,
    ) -> EventStatus {
        let Some(attachment) = self.attachment.as_mut() else {
            return EventStatus::Ignored;
        };
        attachment
            .controller
            .handle_event(viewer, &mut attachment.store, &self.renderer, event)
    }

    /// Overlay paint callback. Returns the number of labels drawn.
    pub fn paint<V: ViewerHost, C: LabelCanvas + ?Sized>(
        &self,
        viewer: &V,
        canvas: &mut C,
    ) -> usize {
        match &self.attachment {
            Some(attachment) => self.renderer.paint(viewer, &attachment.store, canvas),
            None => 0,
        }
    }
}
