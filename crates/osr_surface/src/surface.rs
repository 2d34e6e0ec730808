use log::{debug, trace, warn};
use osr_core::{BrowserEngine, CursorType, DragOperation, HostButton, KeyCode, Modifiers, Navigability, Point};
use osr_cursor::{CursorSystem, default_listener};
use osr_drag::DragContext;
use osr_input::{BrowserAction, Dispatch, InputTranslator, ZoomLevel};
use osr_renderer::{FrameOutcome, PixelSurface, TextureBackend, TextureId};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::info_span;

use crate::callback::{EngineCallback, Frame, SurfaceHandle};
use crate::config::BridgeConfig;
use crate::error::SurfaceError;

/// Receives the cursor to display after drag substitution.
pub type CursorListener = Box<dyn FnMut(CursorType) + Send>;

/// One engine browser presented as a texture-backed widget.
///
/// Must be created, driven and closed on the host's render thread.
pub struct BrowserSurface<E: BrowserEngine, B: TextureBackend> {
    engine: E,
    backend: B,
    pixels: PixelSurface,
    drag: DragContext<E::DragData>,
    input: InputTranslator,
    zoom: ZoomLevel,
    width: u32,
    height: u32,
    cursor_listener: Option<CursorListener>,
    callbacks: UnboundedReceiver<EngineCallback<E::DragData>>,
    handle: SurfaceHandle<E::DragData>,
    closed: bool,
    cleanup_pending: bool,
}

impl<E: BrowserEngine, B: TextureBackend> BrowserSurface<E, B> {
    /// Wrap `engine`, ask it to allocate its browser and allocate the
    /// texture handle.
    ///
    /// # Errors
    /// Fails when the backend cannot allocate a texture.
    pub fn create(mut engine: E, mut backend: B, config: &BridgeConfig) -> Result<Self, SurfaceError> {
        let mut pixels = PixelSurface::new(config.transparent);
        pixels.initialize(&mut backend)?;
        engine.create_immediately();
        let (tx, rx) = unbounded_channel();
        debug!(target: "osr_surface", "browser created, transparent: {}", config.transparent);
        Ok(Self {
            engine,
            backend,
            pixels,
            drag: DragContext::new(),
            input: config.translator(),
            zoom: config.zoom(),
            width: 0,
            height: 0,
            cursor_listener: None,
            callbacks: rx,
            handle: SurfaceHandle::new(tx),
            closed: false,
            cleanup_pending: false,
        })
    }

    /// `create` followed by `resize`.
    ///
    /// # Errors
    /// Fails when the backend cannot allocate a texture.
    pub fn create_sized(
        engine: E,
        backend: B,
        config: &BridgeConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, SurfaceError> {
        let mut surface = Self::create(engine, backend, config)?;
        surface.resize(width, height);
        Ok(surface)
    }

    /// Handle for the engine's callback threads.
    pub fn handle(&self) -> SurfaceHandle<E::DragData> {
        self.handle.clone()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Texture to sample, `None` until allocated and after close.
    pub fn texture(&self) -> Option<TextureId> {
        self.pixels.texture()
    }

    /// Texture id with 0 meaning unallocated.
    pub fn raw_texture_id(&self) -> u32 {
        self.pixels.raw_texture_id()
    }

    pub fn pixels(&self) -> &PixelSurface {
        &self.pixels
    }

    pub fn is_transparent(&self) -> bool {
        self.pixels.is_transparent()
    }

    /// Last size passed to `resize`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom.level()
    }

    pub fn drag(&self) -> &DragContext<E::DragData> {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn input(&self) -> &InputTranslator {
        &self.input
    }

    /// Translator access, e.g. to rebind shortcuts.
    pub fn input_mut(&mut self) -> &mut InputTranslator {
        &mut self.input
    }

    pub fn using_browser_controls(&self) -> bool {
        self.input.browser_controls()
    }

    /// Enable or disable reload, zoom and history shortcuts.
    pub fn use_browser_controls(&mut self, enabled: bool) -> &mut Self {
        self.input.set_browser_controls(enabled);
        self
    }

    pub fn navigability(&self) -> Navigability {
        Navigability::of(&self.engine)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closed off the render thread; the texture is released on the next
    /// render-thread `pump` or `close`.
    pub fn is_cleanup_pending(&self) -> bool {
        self.cleanup_pending
    }

    /// Replace the cursor-change listener.
    pub fn set_cursor_listener(&mut self, listener: impl FnMut(CursorType) + Send + 'static) {
        self.cursor_listener = Some(Box::new(listener));
    }

    /// Show cursors through `system`, resolving handles via the global cache.
    pub fn set_cursor_system<S: CursorSystem + Send + 'static>(&mut self, system: S) {
        self.set_cursor_listener(default_listener(system));
    }

    pub fn clear_cursor_listener(&mut self) {
        self.cursor_listener = None;
    }

    fn notify_cursor(&mut self, cursor: CursorType) {
        match self.cursor_listener.as_mut() {
            Some(listener) => listener(cursor),
            None => trace!(target: "osr_surface", "cursor {cursor:?} with no listener"),
        }
    }

    fn ensure_open(&self, what: &str) -> bool {
        if self.closed {
            debug!(target: "osr_surface", "{what} on closed surface ignored");
        }
        !self.closed
    }

    /// Apply every queued engine callback. Call once per host frame.
    ///
    /// Off the render thread frames stay queued for the next render-thread
    /// pump; only callbacks queued before the call are drained.
    pub fn pump(&mut self) -> usize {
        let _span = info_span!("osr_pump").entered();
        if self.closed {
            if self.cleanup_pending {
                self.release_texture();
            }
            return 0;
        }
        let on_thread = self.pixels.is_render_thread();
        let queued = self.callbacks.len();
        let mut deferred = Vec::new();
        let mut applied = 0;
        for _ in 0..queued {
            let Ok(callback) = self.callbacks.try_recv() else {
                break;
            };
            match callback {
                EngineCallback::Paint(frame) if !on_thread => deferred.push(frame),
                callback => {
                    self.apply(callback);
                    applied += 1;
                }
            }
        }
        if !deferred.is_empty() {
            debug!(target: "osr_surface", "{} frames deferred to the render thread", deferred.len());
        }
        for frame in deferred {
            self.handle.send(EngineCallback::Paint(frame));
        }
        applied
    }

    fn apply(&mut self, callback: EngineCallback<E::DragData>) {
        match callback {
            EngineCallback::Paint(frame) => {
                if let Err(err) = self.paint(frame) {
                    warn!(target: "osr_surface", "frame rejected: {err}");
                }
            }
            EngineCallback::CursorChange(id) => self.on_cursor_change(CursorType::from_id_or_pointer(id)),
            EngineCallback::StartDragging {
                data,
                allowed,
                position,
            } => self.start_dragging(data, allowed, position),
            EngineCallback::UpdateDragCursor(operation) => self.update_drag_cursor(operation),
        }
    }

    /// Upload a frame. Popup frames are ignored.
    ///
    /// # Errors
    /// Fails when the buffer is too small or the backend rejects the upload.
    pub fn paint(&mut self, frame: Frame) -> Result<FrameOutcome, SurfaceError> {
        if !self.ensure_open("paint") {
            return Ok(FrameOutcome::Skipped);
        }
        if frame.popup {
            trace!(target: "osr_surface", "popup frame ignored");
            return Ok(FrameOutcome::Skipped);
        }
        let on_thread = self.pixels.is_render_thread();
        debug_assert!(on_thread, "paint called off the render thread");
        if !on_thread {
            self.handle.send(EngineCallback::Paint(frame));
            return Ok(FrameOutcome::Skipped);
        }
        let outcome = self.pixels.on_frame(
            &mut self.backend,
            &frame.buffer,
            frame.width,
            frame.height,
            &frame.dirty_rects,
        )?;
        Ok(outcome)
    }

    /// The engine changed its cursor.
    pub fn on_cursor_change(&mut self, cursor: CursorType) {
        if !self.ensure_open("cursor change") {
            return;
        }
        let shown = self.drag.virtual_cursor(cursor);
        self.notify_cursor(shown);
    }

    /// The engine started a drag at `position`.
    pub fn start_dragging(&mut self, data: Option<E::DragData>, allowed: DragOperation, position: Point) {
        if !self.ensure_open("drag start") {
            return;
        }
        self.drag.start_dragging(data, allowed);
        self.drag.enter(&mut self.engine, position, self.input.button_mask());
    }

    /// The drop target negotiated `operation`.
    pub fn update_drag_cursor(&mut self, operation: DragOperation) {
        if !self.ensure_open("drag cursor") {
            return;
        }
        if let Some(cursor) = self.drag.update_cursor(operation) {
            self.notify_cursor(cursor);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.ensure_open("resize") {
            return;
        }
        self.width = width;
        self.height = height;
        self.engine.was_resized(width, height);
    }

    fn perform(&mut self, action: BrowserAction) {
        debug!(target: "osr_surface", "browser action {action:?}");
        match action {
            BrowserAction::Reload => self.engine.reload(),
            BrowserAction::GoBack => self.engine.go_back(),
            BrowserAction::GoForward => self.engine.go_forward(),
            BrowserAction::ZoomIn | BrowserAction::ZoomOut | BrowserAction::ResetZoom => {
                if let Some(level) = self.zoom.apply(action) {
                    self.engine.set_zoom_level(f64::from(level));
                }
            }
        }
    }

    pub fn send_key_press(&mut self, key_code: KeyCode, scan_code: u64, modifiers: Modifiers) {
        if !self.ensure_open("key press") {
            return;
        }
        match self.input.key_press(key_code, scan_code, modifiers, self.navigability()) {
            Dispatch::Forward(event) => self.engine.send_key_event(&event),
            Dispatch::Action(action) => self.perform(action),
            Dispatch::Swallow => {}
        }
    }

    pub fn send_key_release(&mut self, key_code: KeyCode, scan_code: u64, modifiers: Modifiers) {
        if !self.ensure_open("key release") {
            return;
        }
        match self.input.key_release(key_code, scan_code, modifiers, self.navigability()) {
            Dispatch::Forward(event) => self.engine.send_key_event(&event),
            Dispatch::Action(action) => self.perform(action),
            Dispatch::Swallow => {}
        }
    }

    pub fn send_key_typed(&mut self, character: char, modifiers: Modifiers) {
        if !self.ensure_open("key typed") {
            return;
        }
        match self.input.key_typed(character, modifiers, self.navigability()) {
            Dispatch::Forward(event) => self.engine.send_key_event(&event),
            Dispatch::Action(action) => self.perform(action),
            Dispatch::Swallow => {}
        }
    }

    /// Pointer motion; during a drag also a drag-over at the same point.
    pub fn send_mouse_move(&mut self, x: i32, y: i32) {
        if !self.ensure_open("mouse move") {
            return;
        }
        let mask = self.input.button_mask();
        let event = self.input.mouse_move(x, y, self.drag.virtual_modifiers(mask));
        self.engine.send_mouse_event(&event);
        self.drag.over(&mut self.engine, Point::new(x, y), mask);
    }

    pub fn send_mouse_press(&mut self, x: i32, y: i32, button: HostButton) {
        if !self.ensure_open("mouse press") {
            return;
        }
        let event = self.input.mouse_press(x, y, button);
        self.engine.send_mouse_event(&event);
    }

    /// Button release; a primary release during a drag then drops.
    pub fn send_mouse_release(&mut self, x: i32, y: i32, button: HostButton) {
        if !self.ensure_open("mouse release") {
            return;
        }
        let event = self.input.mouse_release(x, y, button);
        self.engine.send_mouse_event(&event);
        self.drag
            .release(&mut self.engine, event.button, Point::new(x, y), event.modifiers);
    }

    pub fn send_mouse_wheel(&mut self, x: i32, y: i32, delta: f64, modifiers: Modifiers) {
        if !self.ensure_open("mouse wheel") {
            return;
        }
        match self.input.mouse_wheel(x, y, delta, modifiers) {
            Dispatch::Forward(event) => self.engine.send_mouse_wheel_event(&event),
            Dispatch::Action(action) => self.perform(action),
            Dispatch::Swallow => {}
        }
    }

    fn release_texture(&mut self) {
        if !self.pixels.is_render_thread() {
            debug!(target: "osr_surface", "texture release deferred to the render thread");
            self.cleanup_pending = true;
            return;
        }
        match self.pixels.cleanup(&mut self.backend) {
            Ok(()) => self.cleanup_pending = false,
            Err(err) => {
                warn!(target: "osr_surface", "texture not released: {err}");
                self.cleanup_pending = true;
            }
        }
    }

    /// Release the texture, end any drag and close the engine browser.
    /// Off the render thread the texture release waits for the next
    /// render-thread `pump` or `close`. Later calls only finish that release.
    pub fn close(&mut self) {
        if self.closed {
            if self.cleanup_pending {
                self.release_texture();
            } else {
                debug!(target: "osr_surface", "close on closed surface ignored");
            }
            return;
        }
        self.release_texture();
        self.drag.cancel();
        self.input.reset_buttons();
        self.engine.close(true);
        self.callbacks.close();
        self.closed = true;
        debug!(target: "osr_surface", "browser closed");
    }
}

impl<E: BrowserEngine, B: TextureBackend> Drop for BrowserSurface<E, B> {
    fn drop(&mut self) {
        if self.closed && !self.cleanup_pending {
            return;
        }
        self.close();
        if self.cleanup_pending {
            warn!(target: "osr_surface", "surface dropped off the render thread; texture leaked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osr_core::keys::{KEY_0, KEY_EQUAL, KEY_LEFT, KEY_R};
    use osr_core::test_support::{EngineCall, RecordingEngine};
    use osr_core::{ButtonMask, EngineButton, MouseEventKind};
    use osr_renderer::MemoryBackend;

    fn surface() -> BrowserSurface<RecordingEngine, MemoryBackend> {
        let mut surface =
            BrowserSurface::create(RecordingEngine::new(), MemoryBackend::new(), &BridgeConfig::default()).unwrap();
        surface.engine_mut().take_calls();
        surface
    }

    #[test]
    fn create_allocates_texture_and_browser() {
        let surface = BrowserSurface::create_sized(
            RecordingEngine::new(),
            MemoryBackend::new(),
            &BridgeConfig::default(),
            320,
            200,
        )
        .unwrap();
        assert!(surface.texture().is_some());
        assert_eq!(surface.size(), (320, 200));
        assert_eq!(
            surface.engine().calls,
            vec![EngineCall::CreateImmediately, EngineCall::WasResized(320, 200)]
        );
    }

    #[test]
    fn ctrl_r_reloads_without_forwarding() {
        let mut surface = surface();
        surface.send_key_press(KEY_R, 19, Modifiers::CONTROL);
        surface.send_key_typed('r', Modifiers::CONTROL);
        surface.send_key_release(KEY_R, 19, Modifiers::CONTROL);
        assert_eq!(surface.engine().calls, vec![EngineCall::Reload]);
    }

    #[test]
    fn zoom_steps_are_sent_and_clamped() {
        let mut surface = surface();
        for _ in 0..12 {
            surface.send_key_press(KEY_EQUAL, 13, Modifiers::CONTROL);
        }
        assert_eq!(surface.zoom_level(), 9);
        let zooms = surface
            .engine()
            .calls
            .iter()
            .filter(|call| matches!(call, EngineCall::SetZoomLevel(_)))
            .count();
        assert_eq!(zooms, 9);
        surface.send_key_press(KEY_0, 11, Modifiers::CONTROL);
        assert_eq!(surface.zoom_level(), 0);
        assert_eq!(surface.engine().calls.last(), Some(&EngineCall::SetZoomLevel(0.0)));
    }

    #[test]
    fn history_chords_need_history() {
        let mut surface = surface();
        surface.send_key_press(KEY_LEFT, 105, Modifiers::ALT);
        assert!(matches!(surface.engine().calls.as_slice(), [EngineCall::Key(_)]));
        surface.engine_mut().take_calls();
        surface.engine_mut().can_go_back = true;
        surface.send_key_press(KEY_LEFT, 105, Modifiers::ALT);
        assert_eq!(surface.engine().calls, vec![EngineCall::GoBack]);
    }

    #[test]
    fn controls_toggle_forwards_chords() {
        let mut surface = surface();
        surface.use_browser_controls(false);
        assert!(!surface.using_browser_controls());
        surface.send_key_press(KEY_R, 19, Modifiers::CONTROL);
        surface.send_mouse_wheel(0, 0, 1.0, Modifiers::CONTROL);
        assert!(matches!(
            surface.engine().calls.as_slice(),
            [EngineCall::Key(_), EngineCall::Wheel(_)]
        ));
    }

    #[test]
    fn ctrl_wheel_zooms() {
        let mut surface = surface();
        surface.send_mouse_wheel(0, 0, 0.5, Modifiers::CONTROL);
        surface.send_mouse_wheel(0, 0, -2.0, Modifiers::CONTROL);
        surface.send_mouse_wheel(0, 0, -2.0, Modifiers::CONTROL);
        assert_eq!(
            surface.engine().calls,
            vec![
                EngineCall::SetZoomLevel(1.0),
                EngineCall::SetZoomLevel(0.0),
                EngineCall::SetZoomLevel(-1.0),
            ]
        );
    }

    #[test]
    fn buttons_swap_and_track_mask() {
        let mut surface = surface();
        surface.send_mouse_press(1, 2, HostButton::RIGHT);
        surface.send_mouse_move(3, 4);
        surface.send_mouse_release(3, 4, HostButton::RIGHT);
        let mice: Vec<_> = surface
            .engine()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Mouse(event) => Some((event.kind, event.button, event.modifiers)),
                _ => None,
            })
            .collect();
        assert_eq!(
            mice,
            vec![
                (MouseEventKind::Pressed, EngineButton::RIGHT, ButtonMask::BUTTON2),
                (MouseEventKind::Moved, EngineButton::PRIMARY, ButtonMask::BUTTON2),
                (MouseEventKind::Released, EngineButton::RIGHT, ButtonMask::empty()),
            ]
        );
    }

    #[test]
    fn closed_surface_ignores_everything() {
        let mut surface = surface();
        surface.close();
        surface.engine_mut().take_calls();
        surface.send_key_press(KEY_R, 19, Modifiers::empty());
        surface.send_mouse_move(0, 0);
        surface.resize(10, 10);
        surface.close();
        assert!(surface.engine().calls.is_empty());
        assert!(surface.is_closed());
    }
}
