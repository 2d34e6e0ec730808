//! Shared vocabulary for the off-screen browser bridge.
//!
//! Everything that crosses the boundary between the host application and the
//! browser engine lives here: host key and modifier codes, the engine's event
//! types and button mask convention, cursor types, drag operations and the
//! `BrowserEngine` collaborator trait the bridge drives.

pub mod cursor;
pub mod drag;
pub mod engine;
pub mod event;
pub mod geometry;
pub mod keys;
#[cfg(any(test, feature = "testing"))]
pub mod test_support;

pub use cursor::{CursorType, StandardCursor};
pub use drag::DragOperation;
pub use engine::{BrowserEngine, Navigability};
pub use event::{
    ButtonMask, EngineButton, HostButton, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
    WheelEvent, WheelEventKind,
};
pub use geometry::{Point, Rect};
pub use keys::{KeyCode, Modifiers};
