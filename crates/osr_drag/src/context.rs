use log::{debug, trace, warn};
use osr_core::{BrowserEngine, ButtonMask, CursorType, DragOperation, EngineButton, Point};

use crate::substitution::substitute_cursor;

/// Bits asserted on every mouse event while dragging. The engine keys drag
/// continuation off the primary button bit, whatever the host reports.
pub const DRAG_VIRTUAL_MODIFIERS: ButtonMask = ButtonMask::BUTTON1;

/// Drag session state: `idle` until `start_dragging`, back to `idle` on drop
/// or cancel.
#[derive(Debug)]
pub struct DragContext<D> {
    dragging: bool,
    data: Option<D>,
    allowed: DragOperation,
    operation: DragOperation,
    requested_cursor: CursorType,
    displayed_cursor: CursorType,
}

impl<D> Default for DragContext<D> {
    fn default() -> Self {
        Self {
            dragging: false,
            data: None,
            allowed: DragOperation::empty(),
            operation: DragOperation::empty(),
            requested_cursor: CursorType::Pointer,
            displayed_cursor: CursorType::Pointer,
        }
    }
}

impl<D> DragContext<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Effects the engine allows for the current drag.
    pub fn allowed(&self) -> DragOperation {
        self.allowed
    }

    /// Last operation negotiated with the drop target.
    pub fn operation(&self) -> DragOperation {
        self.operation
    }

    /// Cursor currently shown, after substitution.
    pub fn displayed_cursor(&self) -> CursorType {
        self.displayed_cursor
    }

    /// Enter the dragging state. A drag already in progress is replaced.
    pub fn start_dragging(&mut self, data: Option<D>, allowed: DragOperation) {
        if self.dragging {
            warn!(target: "osr_drag", "drag started while another drag was active");
        }
        if data.is_none() {
            debug!(target: "osr_drag", "drag started without data");
        }
        self.dragging = true;
        self.data = data;
        self.allowed = allowed;
        self.operation = allowed;
        debug!(target: "osr_drag", "drag started, allowed {allowed:?}");
    }

    /// Leave the dragging state and drop the payload.
    pub fn stop_dragging(&mut self) {
        self.dragging = false;
        self.data = None;
        self.allowed = DragOperation::empty();
        self.operation = DragOperation::empty();
    }

    /// Force the context idle. Returns whether a drag was discarded.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.dragging;
        if was_dragging {
            debug!(target: "osr_drag", "drag cancelled");
        }
        self.stop_dragging();
        was_dragging
    }

    /// Modifiers to report for `mask`, with the drag bits asserted while
    /// dragging.
    pub fn virtual_modifiers(&self, mask: ButtonMask) -> ButtonMask {
        if self.dragging {
            mask | DRAG_VIRTUAL_MODIFIERS
        } else {
            mask
        }
    }

    /// Record the cursor the engine asked for and return the one to show.
    pub fn virtual_cursor(&mut self, requested: CursorType) -> CursorType {
        self.requested_cursor = requested;
        self.displayed_cursor = if self.dragging {
            substitute_cursor(requested, self.operation)
        } else {
            requested
        };
        self.displayed_cursor
    }

    /// Record the negotiated operation. Returns the cursor to show when the
    /// substitution changed it.
    pub fn update_cursor(&mut self, operation: DragOperation) -> Option<CursorType> {
        self.operation = operation;
        if !self.dragging {
            return None;
        }
        let cursor = substitute_cursor(self.requested_cursor, operation);
        if cursor == self.displayed_cursor {
            return None;
        }
        trace!(target: "osr_drag", "drag cursor {:?} -> {cursor:?}", self.displayed_cursor);
        self.displayed_cursor = cursor;
        Some(cursor)
    }
}

impl<D: Send + 'static> DragContext<D> {
    /// Tell the engine the drag entered the view.
    pub fn enter<E>(&self, engine: &mut E, position: Point, mask: ButtonMask)
    where
        E: BrowserEngine<DragData = D> + ?Sized,
    {
        if !self.dragging {
            return;
        }
        engine.drag_target_drag_enter(self.data.as_ref(), position, self.virtual_modifiers(mask), self.allowed);
    }

    /// Pointer motion during a drag. Returns whether a drag-over was sent.
    pub fn over<E>(&self, engine: &mut E, position: Point, mask: ButtonMask) -> bool
    where
        E: BrowserEngine<DragData = D> + ?Sized,
    {
        if !self.dragging {
            return false;
        }
        engine.drag_target_drag_over(position, self.virtual_modifiers(mask), self.allowed);
        true
    }

    /// A button came up. A primary release ends the drag with drop then
    /// leave; other buttons are not part of the drag. Returns whether the
    /// drag ended.
    pub fn release<E>(&mut self, engine: &mut E, button: EngineButton, position: Point, mask: ButtonMask) -> bool
    where
        E: BrowserEngine<DragData = D> + ?Sized,
    {
        if !self.dragging || button != EngineButton::PRIMARY {
            return false;
        }
        engine.drag_target_drop(position, mask);
        engine.drag_target_drag_leave();
        self.stop_dragging();
        debug!(target: "osr_drag", "drag dropped at {},{}", position.x, position.y);
        true
    }
}
