//! The browser engine as seen from the bridge.
//!
//! The engine renders off-screen and delivers frames, cursor changes and drag
//! starts asynchronously. Those callbacks do not appear here; they enter the
//! bridge through the surface's callback handle. This trait is the other
//! direction: everything the bridge asks of the engine.

use crate::drag::DragOperation;
use crate::event::{ButtonMask, KeyEvent, MouseEvent, WheelEvent};
use crate::geometry::Point;

/// Commands the bridge issues to one engine browser instance.
pub trait BrowserEngine {
    /// Opaque drag payload produced by the engine and handed back on drag-enter.
    type DragData: Send + 'static;

    /// Synchronously allocate the underlying browser object.
    fn create_immediately(&mut self);

    /// Tell the engine the view now measures `width` x `height` pixels.
    fn was_resized(&mut self, width: u32, height: u32);

    /// Close the browser object.
    fn close(&mut self, force: bool);

    fn send_key_event(&mut self, event: &KeyEvent);

    fn send_mouse_event(&mut self, event: &MouseEvent);

    fn send_mouse_wheel_event(&mut self, event: &WheelEvent);

    fn reload(&mut self);

    fn go_back(&mut self);

    fn go_forward(&mut self);

    fn can_go_back(&self) -> bool;

    fn can_go_forward(&self) -> bool;

    /// Set the engine zoom level. 0 is 100%, each step is one zoom notch.
    fn set_zoom_level(&mut self, level: f64);

    /// The pointer entered the view carrying `data`. `None` for a degenerate
    /// drag whose payload the engine did not supply.
    fn drag_target_drag_enter(
        &mut self,
        data: Option<&Self::DragData>,
        position: Point,
        modifiers: ButtonMask,
        allowed: DragOperation,
    );

    fn drag_target_drag_over(&mut self, position: Point, modifiers: ButtonMask, allowed: DragOperation);

    fn drag_target_drop(&mut self, position: Point, modifiers: ButtonMask);

    fn drag_target_drag_leave(&mut self);
}

/// Snapshot of the engine's history navigability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigability {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl Navigability {
    /// Read navigability from an engine.
    pub fn of<E: BrowserEngine + ?Sized>(engine: &E) -> Self {
        Self {
            can_go_back: engine.can_go_back(),
            can_go_forward: engine.can_go_forward(),
        }
    }

    /// Both directions available.
    pub const BOTH: Self = Self {
        can_go_back: true,
        can_go_forward: true,
    };
}
