//! Everything the demo window owns once it is up.

use std::sync::Arc;

use anyhow::Error;
use log::debug;
use osr_core::{HostButton, Modifiers};
use osr_surface::{BridgeConfig, BrowserSurface, SurfaceFactory};
use osr_wgpu::{GpuContext, TexturePresenter, WgpuTextureBackend};
use tokio::runtime::Runtime;
use wgpu::{
    Color, CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment, RenderPassDescriptor, StoreOp,
    TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::cursor::WinitCursors;
use crate::pattern::{PatternEngine, PatternFactory};

pub const START_URL: &str = "demo://pattern";

pub struct AppState {
    pub gpu: GpuContext,
    pub presenter: TexturePresenter,
    pub factory: SurfaceFactory<PatternFactory>,
    pub browser: BrowserSurface<PatternEngine, WgpuTextureBackend>,
    pub modifiers: Modifiers,
    pub pointer: (i32, i32),
    /// Owns the engine's paint task; dropped last.
    pub runtime: Runtime,
}

impl AppState {
    pub fn new(window: Arc<Window>, config: BridgeConfig) -> Result<Self, Error> {
        let runtime = Runtime::new()?;
        let gpu = pollster::block_on(GpuContext::new(Arc::clone(&window)))?;
        let presenter = TexturePresenter::new(Arc::clone(gpu.device()), gpu.render_format());

        let mut factory = SurfaceFactory::new(config);
        factory.initialize(PatternFactory::new(Arc::clone(gpu.device()), Arc::clone(gpu.queue())));
        let size = gpu.size();
        let transparent = factory.config().transparent;
        let mut browser = factory.create_browser_sized(START_URL, transparent, size.width, size.height)?;
        browser.set_cursor_system(WinitCursors::new(window));
        let handle = browser.handle();
        browser.engine_mut().attach(handle, runtime.handle());

        Ok(Self {
            gpu,
            presenter,
            factory,
            browser,
            modifiers: Modifiers::empty(),
            pointer: (0, 0),
            runtime,
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
        self.browser.resize(size.width, size.height);
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
        self.browser.send_mouse_move(x, y);
    }

    pub fn button(&mut self, button: HostButton, pressed: bool) {
        let (x, y) = self.pointer;
        if pressed {
            self.browser.send_mouse_press(x, y, button);
        } else {
            self.browser.send_mouse_release(x, y, button);
        }
    }

    /// Apply engine callbacks and draw the browser texture.
    pub fn render(&mut self) -> Result<(), Error> {
        self.browser.pump();
        let frame = self.gpu.get_current_texture()?;
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self.gpu.device().create_command_encoder(&CommandEncoderDescriptor {
            label: Some("osr-demo-encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("osr-demo-pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: 0.08,
                            g: 0.08,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(texture) = self.browser.texture() {
                self.presenter.draw(self.browser.backend(), texture, &mut pass);
            }
        }
        self.gpu.queue().submit([encoder.finish()]);
        frame.present();
        Ok(())
    }

    /// Close the browser, then the engine runtime.
    pub fn shutdown(&mut self) {
        self.browser.close();
        self.presenter.release();
        self.factory.shutdown();
        debug!(target: "osr_demo", "demo state shut down");
    }
}
