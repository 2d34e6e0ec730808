//! Cursor system over a winit window.

use std::sync::Arc;

use osr_core::StandardCursor;
use osr_cursor::{CursorHandle, CursorSystem};
use winit::window::{CursorIcon, Window};

pub struct WinitCursors {
    window: Arc<Window>,
    icons: Vec<CursorIcon>,
}

impl WinitCursors {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            icons: Vec::new(),
        }
    }
}

fn icon_for(shape: StandardCursor) -> CursorIcon {
    match shape {
        StandardCursor::Arrow => CursorIcon::Default,
        StandardCursor::IBeam => CursorIcon::Text,
        StandardCursor::Crosshair => CursorIcon::Crosshair,
        StandardCursor::PointingHand => CursorIcon::Pointer,
        StandardCursor::ResizeEastWest => CursorIcon::EwResize,
        StandardCursor::ResizeNorthSouth => CursorIcon::NsResize,
        StandardCursor::ResizeNorthWestSouthEast => CursorIcon::NwseResize,
        StandardCursor::ResizeNorthEastSouthWest => CursorIcon::NeswResize,
        StandardCursor::ResizeAll => CursorIcon::Move,
        StandardCursor::NotAllowed => CursorIcon::NotAllowed,
    }
}

impl CursorSystem for WinitCursors {
    fn create_standard_cursor(&mut self, shape: StandardCursor) -> CursorHandle {
        self.icons.push(icon_for(shape));
        CursorHandle((self.icons.len() - 1) as u64)
    }

    fn set_cursor(&mut self, handle: CursorHandle) {
        let Some(icon) = usize::try_from(handle.0).ok().and_then(|index| self.icons.get(index)) else {
            log::warn!(target: "osr_demo", "unknown cursor handle {}", handle.0);
            return;
        };
        self.window.set_cursor_visible(true);
        self.window.set_cursor(*icon);
    }

    fn hide_cursor(&mut self) {
        self.window.set_cursor_visible(false);
    }
}
