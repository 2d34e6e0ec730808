//! `PixelSurface`: one texture kept in sync with the engine's frames.

use std::thread::{self, ThreadId};

use log::{debug, trace, warn};
use osr_core::Rect;
use tracing::info_span;

use crate::backend::{BYTES_PER_PIXEL, TextureBackend, TextureId, UnpackLayout};
use crate::error::RenderError;

/// What a call to `PixelSurface::on_frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame size changed; the whole buffer was uploaded.
    Full,
    /// `regions` dirty rectangles were uploaded.
    Partial { regions: usize },
    /// Nothing was uploaded: no texture yet, or the surface was cleaned up.
    Skipped,
}

/// Owns the texture backing a browser frame.
///
/// The texture is only valid between `initialize` (or the first frame) and
/// `cleanup`. All backend calls happen on the thread that created the surface.
#[derive(Debug)]
pub struct PixelSurface {
    texture: Option<TextureId>,
    width: u32,
    height: u32,
    transparent: bool,
    released: bool,
    render_thread: ThreadId,
}

impl PixelSurface {
    /// Create a surface bound to the calling thread as its render thread.
    pub fn new(transparent: bool) -> Self {
        Self::bound_to(transparent, thread::current().id())
    }

    /// Create a surface bound to an explicit render thread.
    pub fn bound_to(transparent: bool, render_thread: ThreadId) -> Self {
        Self {
            texture: None,
            width: 0,
            height: 0,
            transparent,
            released: false,
            render_thread,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Texture handle as the host sees it, 0 when unallocated.
    pub fn raw_texture_id(&self) -> u32 {
        self.texture.map_or(0, TextureId::get)
    }

    /// Size of the last full repaint.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn render_thread(&self) -> ThreadId {
        self.render_thread
    }

    pub fn is_render_thread(&self) -> bool {
        thread::current().id() == self.render_thread
    }

    fn check_render_thread(&self) -> Result<(), RenderError> {
        let on_thread = self.is_render_thread();
        debug_assert!(on_thread, "texture accessed off the render thread");
        if on_thread {
            Ok(())
        } else {
            Err(RenderError::OffRenderThread)
        }
    }

    /// Allocate the texture handle ahead of the first frame.
    ///
    /// # Errors
    /// Fails off the render thread or when the backend cannot allocate.
    pub fn initialize<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), RenderError> {
        self.check_render_thread()?;
        if self.released {
            warn!(target: "osr_renderer", "initialize after cleanup ignored");
            return Ok(());
        }
        if self.texture.is_none() {
            let texture = backend.create_texture()?;
            debug!(target: "osr_renderer", "allocated texture {}", texture.get());
            self.texture = Some(texture);
        }
        Ok(())
    }

    /// Apply one engine frame.
    ///
    /// A size change triggers a full upload, reallocating storage. Otherwise
    /// each dirty rectangle is uploaded on its own, reading the rectangle out
    /// of the full-frame buffer with the frame width as stride. Rectangles are
    /// clipped to the frame.
    ///
    /// # Errors
    /// Fails off the render thread, when `buffer` is shorter than
    /// `width * height * 4` bytes, or when the backend rejects an upload.
    pub fn on_frame<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        buffer: &[u8],
        width: u32,
        height: u32,
        dirty_rects: &[Rect],
    ) -> Result<FrameOutcome, RenderError> {
        let _span = info_span!("osr_frame_upload", width, height).entered();
        self.check_render_thread()?;
        if self.released {
            trace!(target: "osr_renderer", "frame after cleanup dropped");
            return Ok(FrameOutcome::Skipped);
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL as usize;
        if buffer.len() < expected {
            return Err(RenderError::BufferTooSmall {
                expected,
                actual: buffer.len(),
            });
        }

        if width != self.width || height != self.height {
            let texture = match self.texture {
                Some(texture) => texture,
                None => {
                    let texture = backend.create_texture()?;
                    self.texture = Some(texture);
                    texture
                }
            };
            if self.transparent {
                backend.set_blend(true);
            }
            backend.upload_full(texture, buffer, width, height)?;
            debug!(target: "osr_renderer", "full repaint {width}x{height} into texture {}", texture.get());
            self.width = width;
            self.height = height;
            return Ok(FrameOutcome::Full);
        }

        let Some(texture) = self.texture else {
            return Ok(FrameOutcome::Skipped);
        };
        if self.transparent {
            backend.set_blend(true);
        }
        let mut regions = 0;
        for rect in dirty_rects {
            let Some(region) = rect.clip_to(width, height) else {
                continue;
            };
            let layout = UnpackLayout::for_region(width, region);
            backend.upload_region(texture, buffer, layout, region)?;
            regions += 1;
        }
        trace!(target: "osr_renderer", "uploaded {regions} dirty regions");
        Ok(FrameOutcome::Partial { regions })
    }

    /// Release the texture. Safe to call any number of times.
    ///
    /// # Errors
    /// Fails off the render thread; the texture is left untouched so the
    /// caller can retry from the render thread.
    pub fn cleanup<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), RenderError> {
        self.check_render_thread()?;
        if let Some(texture) = self.texture.take() {
            backend.delete_texture(texture);
            debug!(target: "osr_renderer", "released texture {}", texture.get());
        }
        self.released = true;
        self.width = 0;
        self.height = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBackend, UploadStats};

    fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; (width * height * BYTES_PER_PIXEL) as usize]
    }

    #[test]
    fn first_frame_is_full_and_allocates() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        assert_eq!(surface.raw_texture_id(), 0);

        let outcome = surface
            .on_frame(&mut backend, &solid(4, 4, 1), 4, 4, &[Rect::new(0, 0, 1, 1)])
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Full);
        assert_ne!(surface.raw_texture_id(), 0);
        assert_eq!(surface.size(), (4, 4));
        assert_eq!(backend.stats().full_uploads, 1);
    }

    #[test]
    fn partial_without_texture_is_skipped() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        // Zero-sized frame matches the initial size, so it takes the partial path.
        let outcome = surface.on_frame(&mut backend, &[], 0, 0, &[Rect::new(0, 0, 1, 1)]).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(backend.stats(), UploadStats::default());
    }

    #[test]
    fn same_size_uploads_each_rect() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        surface.on_frame(&mut backend, &solid(8, 8, 0), 8, 8, &[]).unwrap();
        let outcome = surface
            .on_frame(
                &mut backend,
                &solid(8, 8, 9),
                8,
                8,
                &[Rect::new(0, 0, 2, 2), Rect::new(4, 4, 2, 2), Rect::new(20, 20, 1, 1)],
            )
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Partial { regions: 2 });
        assert_eq!(backend.stats().region_uploads, 2);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        let err = surface.on_frame(&mut backend, &[0; 8], 2, 2, &[]).unwrap_err();
        assert_eq!(err, RenderError::BufferTooSmall { expected: 16, actual: 8 });
    }

    #[test]
    fn transparent_surface_enables_blend() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(true);
        surface.on_frame(&mut backend, &solid(2, 2, 0), 2, 2, &[]).unwrap();
        assert!(backend.blend_enabled());
    }

    #[test]
    fn cleanup_is_idempotent_and_terminal() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        surface.initialize(&mut backend).unwrap();
        let texture = surface.texture().unwrap();

        surface.cleanup(&mut backend).unwrap();
        surface.cleanup(&mut backend).unwrap();
        assert_eq!(backend.deleted(), &[texture]);
        assert_eq!(surface.raw_texture_id(), 0);

        let outcome = surface.on_frame(&mut backend, &solid(2, 2, 0), 2, 2, &[]).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn initialize_reuses_existing_texture() {
        let mut backend = MemoryBackend::new();
        let mut surface = PixelSurface::new(false);
        surface.initialize(&mut backend).unwrap();
        let first = surface.texture();
        surface.initialize(&mut backend).unwrap();
        assert_eq!(surface.texture(), first);
        assert_eq!(backend.live_textures(), 1);
    }
}
