//! Shared test support: an engine double that records every call in order.

use crate::drag::DragOperation;
use crate::engine::BrowserEngine;
use crate::event::{ButtonMask, KeyEvent, MouseEvent, WheelEvent};
use crate::geometry::Point;

/// One call the bridge made on the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    CreateImmediately,
    WasResized(u32, u32),
    Close { force: bool },
    Key(KeyEvent),
    Mouse(MouseEvent),
    Wheel(WheelEvent),
    Reload,
    GoBack,
    GoForward,
    SetZoomLevel(f64),
    DragEnter {
        data: Option<String>,
        position: Point,
        modifiers: ButtonMask,
        allowed: DragOperation,
    },
    DragOver {
        position: Point,
        modifiers: ButtonMask,
        allowed: DragOperation,
    },
    Drop {
        position: Point,
        modifiers: ButtonMask,
    },
    DragLeave,
}

/// `BrowserEngine` that records calls; drag payloads are strings.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with both history directions available.
    pub fn with_history() -> Self {
        Self {
            can_go_back: true,
            can_go_forward: true,
            ..Self::default()
        }
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        core::mem::take(&mut self.calls)
    }

    /// Recorded calls that are drag notifications.
    pub fn drag_calls(&self) -> Vec<&EngineCall> {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    EngineCall::DragEnter { .. }
                        | EngineCall::DragOver { .. }
                        | EngineCall::Drop { .. }
                        | EngineCall::DragLeave
                )
            })
            .collect()
    }
}

impl BrowserEngine for RecordingEngine {
    type DragData = String;

    fn create_immediately(&mut self) {
        self.calls.push(EngineCall::CreateImmediately);
    }

    fn was_resized(&mut self, width: u32, height: u32) {
        self.calls.push(EngineCall::WasResized(width, height));
    }

    fn close(&mut self, force: bool) {
        self.calls.push(EngineCall::Close { force });
    }

    fn send_key_event(&mut self, event: &KeyEvent) {
        self.calls.push(EngineCall::Key(*event));
    }

    fn send_mouse_event(&mut self, event: &MouseEvent) {
        self.calls.push(EngineCall::Mouse(*event));
    }

    fn send_mouse_wheel_event(&mut self, event: &WheelEvent) {
        self.calls.push(EngineCall::Wheel(*event));
    }

    fn reload(&mut self) {
        self.calls.push(EngineCall::Reload);
    }

    fn go_back(&mut self) {
        self.calls.push(EngineCall::GoBack);
    }

    fn go_forward(&mut self) {
        self.calls.push(EngineCall::GoForward);
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    fn set_zoom_level(&mut self, level: f64) {
        self.calls.push(EngineCall::SetZoomLevel(level));
    }

    fn drag_target_drag_enter(
        &mut self,
        data: Option<&String>,
        position: Point,
        modifiers: ButtonMask,
        allowed: DragOperation,
    ) {
        self.calls.push(EngineCall::DragEnter {
            data: data.cloned(),
            position,
            modifiers,
            allowed,
        });
    }

    fn drag_target_drag_over(&mut self, position: Point, modifiers: ButtonMask, allowed: DragOperation) {
        self.calls.push(EngineCall::DragOver {
            position,
            modifiers,
            allowed,
        });
    }

    fn drag_target_drop(&mut self, position: Point, modifiers: ButtonMask) {
        self.calls.push(EngineCall::Drop { position, modifiers });
    }

    fn drag_target_drag_leave(&mut self) {
        self.calls.push(EngineCall::DragLeave);
    }
}
