//! Demo host: one off-screen browser surface in a winit window.
//!
//! The surface is fed by a synthetic pattern engine. Settings come from the
//! `OSR_*` environment variables read by `BridgeConfig::from_env`.

use std::sync::Arc;

use anyhow::{Error, anyhow};
use log::{error, info};
use osr_surface::BridgeConfig;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::keymap::{host_button, host_key, host_modifiers};
use crate::state::AppState;

mod cursor;
mod keymap;
mod pattern;
mod state;

/// Pixels per wheel line for devices reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

pub fn main() -> Result<(), Error> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config: BridgeConfig::from_env(),
        state: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    config: BridgeConfig,
    state: Option<AppState>,
}

impl App {
    fn resume(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        if self.state.is_some() {
            return Ok(());
        }
        let attributes = Window::default_attributes()
            .with_title("osr demo")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_transparent(self.config.transparent);
        let window = Arc::new(event_loop.create_window(attributes)?);
        self.state = Some(AppState::new(Arc::clone(&window), self.config.clone())?);
        window.request_redraw();
        Ok(())
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<(), Error> {
        let state = self.state.as_mut().ok_or_else(|| anyhow!("App state is not set."))?;
        match event {
            WindowEvent::CloseRequested => {
                info!("The close button was pressed; stopping");
                state.shutdown();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => state.render()?,
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = host_modifiers(modifiers.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = host_key(event.physical_key);
                // winit has no portable scan code; the host code stands in.
                let scan_code = u64::from(key.unsigned_abs());
                match event.state {
                    ElementState::Pressed => {
                        state.browser.send_key_press(key, scan_code, state.modifiers);
                        if let Some(text) = event.text.as_ref() {
                            for character in text.chars() {
                                state.browser.send_key_typed(character, state.modifiers);
                            }
                        }
                    }
                    ElementState::Released => state.browser.send_key_release(key, scan_code, state.modifiers),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.pointer_moved(position.x as i32, position.y as i32);
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(button) = host_button(button) {
                    state.button(button, button_state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => f64::from(lines),
                    MouseScrollDelta::PixelDelta(pixels) => pixels.y / PIXELS_PER_LINE,
                };
                let (x, y) = state.pointer;
                state.browser.send_mouse_wheel(x, y, amount, state.modifiers);
            }
            _ => (),
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(error) = self.resume(event_loop) {
            error!("Failed to resume: {error}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Err(error) = self.window_event(event_loop, event) {
            error!("Failed to handle event: {error}");
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.gpu.window().request_redraw();
        }
    }
}
