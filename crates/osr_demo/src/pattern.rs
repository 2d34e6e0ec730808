//! A stand-in browser engine that paints a pattern off-screen.
//!
//! Frames come from a tokio task at a fixed rate, like an engine's paint
//! thread, and reach the surface through its `SurfaceHandle`. A square
//! follows the pointer so dirty-rect updates are visible; pressing on the
//! square starts a drag, zoom scales it and history moves between tints.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use log::{debug, info};
use osr_core::keys::KEY_SPACE;
use osr_core::{
    BrowserEngine, ButtonMask, CursorType, DragOperation, EngineButton, KeyEvent, KeyEventKind, MouseEvent,
    MouseEventKind, Point, Rect, WheelEvent,
};
use osr_surface::{EngineFactory, SurfaceError, SurfaceHandle};
use osr_wgpu::WgpuTextureBackend;
use tokio::runtime::Handle;
use wgpu::{Device, Queue};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const SQUARE_SIZE: f64 = 48.0;
const PAGES: u32 = 4;

struct Painted {
    buffer: Bytes,
    width: u32,
    height: u32,
    dirty: Vec<Rect>,
}

/// State shared between the engine and its paint task.
struct Scene {
    width: u32,
    height: u32,
    transparent: bool,
    buffer: Vec<u8>,
    pointer: Point,
    scroll: i32,
    zoom: f64,
    page: u32,
    furthest_page: u32,
    reloads: u32,
    dragging: bool,
    drawn: Option<Rect>,
    needs_full: bool,
    closed: bool,
}

impl Scene {
    fn new(transparent: bool) -> Self {
        Self {
            width: 0,
            height: 0,
            transparent,
            buffer: Vec::new(),
            pointer: Point::new(0, 0),
            scroll: 0,
            zoom: 0.0,
            page: 0,
            furthest_page: 0,
            reloads: 0,
            dragging: false,
            drawn: None,
            needs_full: true,
            closed: false,
        }
    }

    fn square(&self) -> Rect {
        let size = (SQUARE_SIZE * 1.2_f64.powf(self.zoom)).round().max(1.0) as u32;
        let size = size.min(self.width).min(self.height);
        let centre_x = i64::from(self.pointer.x) - i64::from(size / 2);
        let centre_y = i64::from(self.pointer.y) - i64::from(size / 2);
        let x = centre_x.clamp(0, i64::from(self.width - size)) as u32;
        let y = centre_y.clamp(0, i64::from(self.height - size)) as u32;
        Rect::new(x, y, size, size)
    }

    fn contains_pointer(&self, point: Point) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
            return false;
        };
        self.drawn.is_some_and(|square| square.contains(x, y))
    }

    fn background(&self, x: u32, y: u32) -> [u8; 4] {
        let tint = ((self.page * 60 + self.reloads * 25) % 256) as u8;
        let shifted = (y as i64 + i64::from(self.scroll)).rem_euclid(i64::from(self.height.max(1))) as u32;
        let blue = (x * 255 / self.width.max(1)) as u8;
        let green = (shifted * 255 / self.height.max(1)) as u8;
        if self.transparent {
            [0, 0, 0, 0]
        } else {
            [blue, green, tint, 255]
        }
    }

    fn fill(&mut self, rect: Rect, square: bool) {
        let colour = if self.dragging { [0, 255, 255, 255] } else { [255, 255, 255, 255] };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let pixel = if square { colour } else { self.background(x, y) };
                let start = (y as usize * self.width as usize + x as usize) * 4;
                if let Some(slot) = self.buffer.get_mut(start..start + 4) {
                    slot.copy_from_slice(&pixel);
                }
            }
        }
    }

    /// Paint whatever changed since the last frame.
    fn paint(&mut self) -> Option<Painted> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let full = Rect::full(self.width, self.height);
        let square = self.square();
        let dirty = if self.needs_full {
            self.buffer.resize(self.width as usize * self.height as usize * 4, 0);
            self.fill(full, false);
            self.fill(square, true);
            self.needs_full = false;
            vec![full]
        } else {
            match self.drawn {
                Some(old) if old == square => return None,
                Some(old) => {
                    self.fill(old, false);
                    self.fill(square, true);
                    vec![old, square]
                }
                None => {
                    self.fill(square, true);
                    vec![square]
                }
            }
        };
        self.drawn = Some(square);
        Some(Painted {
            buffer: Bytes::copy_from_slice(&self.buffer),
            width: self.width,
            height: self.height,
            dirty,
        })
    }
}

fn lock(scene: &Mutex<Scene>) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn paint_loop(scene: Arc<Mutex<Scene>>, handle: SurfaceHandle<String>) {
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    loop {
        ticker.tick().await;
        let painted = {
            let mut scene = lock(&scene);
            if scene.closed {
                break;
            }
            scene.paint()
        };
        let Some(painted) = painted else {
            continue;
        };
        if !handle.on_paint(false, painted.dirty, painted.buffer, painted.width, painted.height) {
            break;
        }
    }
    debug!(target: "osr_demo", "paint loop finished");
}

pub struct PatternEngine {
    url: String,
    scene: Arc<Mutex<Scene>>,
    handle: Option<SurfaceHandle<String>>,
    cursor: CursorType,
}

impl PatternEngine {
    pub fn new(url: &str, transparent: bool) -> Self {
        Self {
            url: url.to_owned(),
            scene: Arc::new(Mutex::new(Scene::new(transparent))),
            handle: None,
            cursor: CursorType::Pointer,
        }
    }

    /// Start painting into the surface behind `handle`.
    pub fn attach(&mut self, handle: SurfaceHandle<String>, runtime: &Handle) {
        runtime.spawn(paint_loop(Arc::clone(&self.scene), handle.clone()));
        self.handle = Some(handle);
        info!(target: "osr_demo", "pattern engine attached for {}", self.url);
    }

    fn set_cursor(&mut self, cursor: CursorType) {
        if cursor == self.cursor {
            return;
        }
        self.cursor = cursor;
        if let Some(handle) = &self.handle {
            handle.on_cursor_change(cursor.id());
        }
    }

    fn navigate(&mut self, page: u32) {
        let mut scene = lock(&self.scene);
        scene.page = page;
        scene.needs_full = true;
    }
}

impl BrowserEngine for PatternEngine {
    type DragData = String;

    fn create_immediately(&mut self) {
        debug!(target: "osr_demo", "creating pattern browser for {}", self.url);
    }

    fn was_resized(&mut self, width: u32, height: u32) {
        let mut scene = lock(&self.scene);
        scene.width = width;
        scene.height = height;
        scene.needs_full = true;
    }

    fn close(&mut self, force: bool) {
        lock(&self.scene).closed = true;
        self.handle = None;
        debug!(target: "osr_demo", "pattern browser closed (force: {force})");
    }

    fn send_key_event(&mut self, event: &KeyEvent) {
        if event.kind == KeyEventKind::Pressed && event.key_code == KEY_SPACE {
            let mut scene = lock(&self.scene);
            let next = (scene.page + 1) % PAGES;
            scene.page = next;
            scene.furthest_page = next;
            scene.needs_full = true;
        }
    }

    fn send_mouse_event(&mut self, event: &MouseEvent) {
        let position = Point::new(event.x, event.y);
        let (over_square, dragging) = {
            let mut scene = lock(&self.scene);
            scene.pointer = position;
            (scene.contains_pointer(position), scene.dragging)
        };
        match event.kind {
            MouseEventKind::Moved if !dragging => {
                self.set_cursor(if over_square { CursorType::Hand } else { CursorType::Pointer });
            }
            MouseEventKind::Pressed if event.button == EngineButton::PRIMARY && over_square => {
                lock(&self.scene).dragging = true;
                if let Some(handle) = &self.handle {
                    let data = format!("square@{},{}", event.x, event.y);
                    handle.start_dragging(Some(data), DragOperation::COPY | DragOperation::MOVE, event.x, event.y);
                    handle.on_cursor_change(CursorType::Copy.id());
                }
            }
            MouseEventKind::Moved | MouseEventKind::Pressed | MouseEventKind::Released => {}
        }
    }

    fn send_mouse_wheel_event(&mut self, event: &WheelEvent) {
        let mut scene = lock(&self.scene);
        scene.scroll = scene.scroll.wrapping_add((event.amount * 8.0) as i32);
        scene.needs_full = true;
    }

    fn reload(&mut self) {
        let mut scene = lock(&self.scene);
        scene.reloads += 1;
        scene.needs_full = true;
        info!(target: "osr_demo", "reload {}", scene.reloads);
    }

    fn go_back(&mut self) {
        let page = lock(&self.scene).page.saturating_sub(1);
        self.navigate(page);
    }

    fn go_forward(&mut self) {
        let page = {
            let scene = lock(&self.scene);
            (scene.page + 1).min(scene.furthest_page)
        };
        self.navigate(page);
    }

    fn can_go_back(&self) -> bool {
        lock(&self.scene).page > 0
    }

    fn can_go_forward(&self) -> bool {
        let scene = lock(&self.scene);
        scene.page < scene.furthest_page
    }

    fn set_zoom_level(&mut self, level: f64) {
        lock(&self.scene).zoom = level;
    }

    fn drag_target_drag_enter(
        &mut self,
        data: Option<&String>,
        position: Point,
        _modifiers: ButtonMask,
        allowed: DragOperation,
    ) {
        debug!(target: "osr_demo", "drag enter {data:?} at {},{} allowing {allowed:?}", position.x, position.y);
    }

    fn drag_target_drag_over(&mut self, position: Point, _modifiers: ButtonMask, allowed: DragOperation) {
        let width = lock(&self.scene).width;
        let operation = if u32::try_from(position.x).is_ok_and(|x| x < width / 2) {
            DragOperation::COPY
        } else {
            DragOperation::MOVE
        };
        if let Some(handle) = &self.handle {
            handle.update_drag_cursor(operation & allowed);
        }
    }

    fn drag_target_drop(&mut self, position: Point, _modifiers: ButtonMask) {
        info!(target: "osr_demo", "dropped square at {},{}", position.x, position.y);
    }

    fn drag_target_drag_leave(&mut self) {
        lock(&self.scene).dragging = false;
        self.set_cursor(CursorType::Pointer);
    }
}

/// Creates pattern engines painting into wgpu textures on one device.
pub struct PatternFactory {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl PatternFactory {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        Self { device, queue }
    }
}

impl EngineFactory for PatternFactory {
    type Engine = PatternEngine;
    type Backend = WgpuTextureBackend;

    fn create_engine(&mut self, url: &str, transparent: bool) -> Result<PatternEngine, SurfaceError> {
        Ok(PatternEngine::new(url, transparent))
    }

    fn create_backend(&mut self) -> WgpuTextureBackend {
        WgpuTextureBackend::new(Arc::clone(&self.device), Arc::clone(&self.queue))
    }
}
