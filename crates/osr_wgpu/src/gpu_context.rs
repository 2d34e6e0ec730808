//! Device, queue and window surface for hosts without a renderer of their own.

use std::sync::Arc;

use anyhow::{Error as AnyhowError, anyhow};
use wgpu::*;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct GpuContext {
    window: Arc<Window>,
    /// Kept alive for the surface's lifetime.
    _instance: Instance,
    device: Arc<Device>,
    queue: Arc<Queue>,
    size: PhysicalSize<u32>,
    surface: Surface<'static>,
    render_format: TextureFormat,
}

impl GpuContext {
    /// Create a device and configure a surface for `window`.
    ///
    /// # Errors
    /// Fails when no adapter or device is available or the window cannot be
    /// presented to.
    pub async fn new(window: Arc<Window>) -> Result<Self, AnyhowError> {
        let instance = Instance::new(&InstanceDescriptor::default());
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|err| anyhow!("Failed to create window surface: {err}"))?;
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| anyhow!("Failed to find a suitable GPU adapter: {err}"))?;
        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("osr-render-device"),
                required_features: Features::empty(),
                required_limits: Limits::default(),
                memory_hints: MemoryHints::default(),
                trace: Trace::default(),
            })
            .await
            .map_err(|err| anyhow!("Failed to create GPU device: {err}"))?;
        device.on_uncaptured_error(Box::new(|error| {
            log::error!(target: "osr_wgpu", "Uncaptured WGPU error: {error:?}");
        }));

        let capabilities = surface.get_capabilities(&adapter);
        let render_format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;
        let size = window.inner_size();
        let context = Self {
            window,
            _instance: instance,
            device: Arc::new(device),
            queue: Arc::new(queue),
            size,
            surface,
            render_format,
        };
        context.configure_surface();
        Ok(context)
    }

    /// Configure the swapchain to match the current size.
    pub fn configure_surface(&self) {
        if self.size.width == 0 || self.size.height == 0 {
            return;
        }
        self.surface.configure(
            &self.device,
            &SurfaceConfiguration {
                usage: TextureUsages::RENDER_ATTACHMENT,
                format: self.render_format,
                view_formats: vec![self.render_format],
                alpha_mode: CompositeAlphaMode::Auto,
                width: self.size.width,
                height: self.size.height,
                desired_maximum_frame_latency: 2,
                present_mode: PresentMode::AutoVsync,
            },
        );
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        self.configure_surface();
    }

    /// # Errors
    /// Fails when the swapchain image cannot be acquired.
    pub fn get_current_texture(&self) -> Result<SurfaceTexture, AnyhowError> {
        Ok(self.surface.get_current_texture()?)
    }

    pub const fn device(&self) -> &Arc<Device> {
        &self.device
    }

    pub const fn queue(&self) -> &Arc<Queue> {
        &self.queue
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub const fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub const fn render_format(&self) -> TextureFormat {
        self.render_format
    }
}
