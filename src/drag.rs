//! Pointer handling for label dragging.
//!
//! The controller is a two-state machine (idle / dragging). A press that
//! lands on a label box starts a drag; every move recomputes the offset from
//! the press point, never from the previous move, so the result after any
//! number of events depends only on where the pointer is now.

use crate::geometry::{Offset, Point};
use crate::host::{AnnotationId, CursorStyle, ViewerHost};
use crate::offset_store::OffsetStore;
use crate::overlay::LabelRenderer;

/// Pointer button of a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Usually the left button; the only one that drags labels
    #[default]
    Primary,
    /// Context-menu button
    Secondary,
    /// Wheel button
    Middle,
}

/// A pointer event on the viewer's display surface (display coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down
    Pressed {
        position: Point,
        button: PointerButton,
    },
    /// The pointer moved, with or without a button held
    Moved {
        position: Point,
    },
    /// A button went up
    Released {
        position: Point,
        button: PointerButton,
    },
}

impl PointerEvent {
    /// Primary-button press at a display point.
    pub fn press(x: f64, y: f64) -> Self {
        PointerEvent::Pressed {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    /// Pointer motion to a display point.
    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Moved {
            position: Point::new(x, y),
        }
    }

    /// Primary-button release at a display point.
    pub fn release(x: f64, y: f64) -> Self {
        PointerEvent::Released {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    /// Display-space position of the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Pressed { position, .. }
            | PointerEvent::Moved { position }
            | PointerEvent::Released { position, .. } => *position,
        }
    }
}

/// Whether the host should still run its default handling for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was used for label dragging; do not pan or select
    Consumed,
    /// Pass the event on to the host
    Ignored,
}

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Annotation whose label is held
    pub annotation: AnnotationId,
    /// Display-space point of the press that started the drag
    pub press_point: Point,
    /// Offset of the annotation at press time
    pub initial_offset: Offset,
}

/// Transient drag state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No label held
    #[default]
    Idle,
    /// A label follows the pointer
    Dragging(ActiveDrag),
}

/// Turns pointer events into label offset changes.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a label is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Annotation whose label is being dragged, if any.
    pub fn dragged_annotation(&self) -> Option<AnnotationId> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.annotation),
            DragState::Idle => None,
        }
    }

    /// Route one pointer event through the state machine.
    pub fn handle_event<V: ViewerHost>(
        &mut self,
        viewer: &mut V,
        store: &mut OffsetStore,
        renderer: &LabelRenderer,
        event: PointerEvent,
    ) -> EventStatus {
        match event {
            PointerEvent::Pressed { position, button } => {
                self.press(viewer, store, renderer, position, button)
            }
            PointerEvent::Moved { position } => self.drag_to(viewer, store, position),
            PointerEvent::Released { button, .. } => self.release(viewer, button),
        }
    }

    fn press<V: ViewerHost>(
        &mut self,
        viewer: &mut V,
        store: &OffsetStore,
        renderer: &LabelRenderer,
        position: Point,
        button: PointerButton,
    ) -> EventStatus {
        if button != PointerButton::Primary {
            return EventStatus::Ignored;
        }

        // A release we never saw; start over from idle.
        if self.is_dragging() {
            self.cancel(viewer);
        }

        let Some(hit) = renderer.label_at(&*viewer, store, &position) else {
            return EventStatus::Ignored;
        };

        log::debug!(
            "Label drag started on annotation {} at ({:.1}, {:.1})",
            hit.annotation,
            position.x,
            position.y
        );
        self.state = DragState::Dragging(ActiveDrag {
            annotation: hit.annotation,
            press_point: position,
            initial_offset: store.get(hit.annotation),
        });
        viewer.set_cursor(CursorStyle::Move);
        EventStatus::Consumed
    }

    fn drag_to<V: ViewerHost>(
        &mut self,
        viewer: &mut V,
        store: &mut OffsetStore,
        position: Point,
    ) -> EventStatus {
        let DragState::Dragging(drag) = self.state else {
            return EventStatus::Ignored;
        };

        let Some(transform) = viewer.view_transform() else {
            log::debug!("Image closed during label drag, cancelling");
            self.cancel(viewer);
            return EventStatus::Ignored;
        };

        let Some(delta) = transform.unapply_vector(position - drag.press_point) else {
            // Degenerate view; keep the drag and wait for a usable transform.
            return EventStatus::Consumed;
        };

        let Some(annotation) = viewer.annotation_mut(drag.annotation) else {
            log::debug!(
                "Annotation {} vanished during label drag, cancelling",
                drag.annotation
            );
            self.cancel(viewer);
            return EventStatus::Ignored;
        };

        store.set(annotation, drag.initial_offset + delta);
        viewer.request_repaint();
        EventStatus::Consumed
    }

    fn release<V: ViewerHost>(&mut self, viewer: &mut V, button: PointerButton) -> EventStatus {
        let DragState::Dragging(drag) = self.state else {
            return EventStatus::Ignored;
        };
        // Only the button that started the drag ends it.
        if button != PointerButton::Primary {
            return EventStatus::Consumed;
        }

        log::debug!("Label drag finished on annotation {}", drag.annotation);
        self.state = DragState::Idle;
        viewer.set_cursor(CursorStyle::Default);
        EventStatus::Consumed
    }

    /// Abort any drag in progress. The offset keeps its last written value.
    ///
    /// Returns whether a drag was active.
    pub fn cancel<V: ViewerHost>(&mut self, viewer: &mut V) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Idle;
        viewer.set_cursor(CursorStyle::Default);
        true
    }
}
