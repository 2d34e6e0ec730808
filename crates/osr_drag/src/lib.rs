//! Drag-and-drop state for one browser surface.
//!
//! The engine starts drags; the host keeps routing pointer motion to the
//! surface, which turns it into drag-over notifications until the primary
//! button is released. `DragContext` tracks that session together with the
//! virtual button and cursor state the engine expects to see meanwhile.

mod context;
mod substitution;

pub use context::{DRAG_VIRTUAL_MODIFIERS, DragContext};
pub use substitution::{CURSOR_SUBSTITUTIONS, CursorSubstitution, substitute_cursor};
