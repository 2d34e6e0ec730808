use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};
use osr_core::Rect;
use osr_renderer::{BYTES_PER_PIXEL, BackendError, TextureBackend, TextureId, UnpackLayout};
use tracing::info_span;
use wgpu::{
    Device, Extent3d, Origin3d, Queue, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
};

/// Engine frames are BGRA, 8 bits per channel.
pub const FRAME_FORMAT: TextureFormat = TextureFormat::Bgra8Unorm;

struct Storage {
    texture: Texture,
    view: TextureView,
    width: u32,
    height: u32,
    generation: u64,
}

/// Queue-side copy parameters for uploading `region` from a buffer laid out
/// as `layout`: data layout, destination origin and copy extent.
pub fn region_copy(layout: UnpackLayout, region: Rect) -> (TexelCopyBufferLayout, Origin3d, Extent3d) {
    (
        TexelCopyBufferLayout {
            offset: layout.byte_offset() as u64,
            bytes_per_row: Some(layout.bytes_per_row() as u32),
            rows_per_image: Some(region.height),
        },
        Origin3d {
            x: region.x,
            y: region.y,
            z: 0,
        },
        Extent3d {
            width: region.width,
            height: region.height,
            depth_or_array_layers: 1,
        },
    )
}

/// `TextureBackend` writing through a wgpu queue.
pub struct WgpuTextureBackend {
    device: Arc<Device>,
    queue: Arc<Queue>,
    textures: HashMap<TextureId, Option<Storage>>,
    next_id: u32,
    generation: u64,
    blend: bool,
}

impl WgpuTextureBackend {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        Self {
            device,
            queue,
            textures: HashMap::new(),
            next_id: 1,
            generation: 0,
            blend: false,
        }
    }

    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }

    /// Whether draws sampling the textures should blend.
    pub fn blend_enabled(&self) -> bool {
        self.blend
    }

    /// View of `texture` plus a counter that changes whenever its storage is
    /// reallocated. `None` before the first full upload.
    pub fn view(&self, texture: TextureId) -> Option<(&TextureView, u64)> {
        self.textures
            .get(&texture)
            .and_then(Option::as_ref)
            .map(|storage| (&storage.view, storage.generation))
    }

    pub fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures
            .get(&texture)
            .and_then(Option::as_ref)
            .map(|storage| (storage.width, storage.height))
    }

    fn allocate(&mut self, width: u32, height: u32) -> Storage {
        self.generation += 1;
        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("osr-frame-texture"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: FRAME_FORMAT,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&TextureViewDescriptor::default());
        Storage {
            texture,
            view,
            width,
            height,
            generation: self.generation,
        }
    }
}

impl TextureBackend for WgpuTextureBackend {
    fn create_texture(&mut self) -> Result<TextureId, BackendError> {
        let id = TextureId::new(self.next_id)
            .ok_or_else(|| BackendError::Gpu(String::from("texture ids exhausted")))?;
        self.next_id = self.next_id.wrapping_add(1);
        self.textures.insert(id, None);
        Ok(id)
    }

    fn upload_full(&mut self, texture: TextureId, pixels: &[u8], width: u32, height: u32) -> Result<(), BackendError> {
        let _span = info_span!("osr_wgpu_upload_full", texture = texture.get(), width, height).entered();
        if !self.textures.contains_key(&texture) {
            return Err(BackendError::UnknownTexture(texture));
        }
        let required = width as usize * height as usize * BYTES_PER_PIXEL as usize;
        if pixels.len() < required {
            return Err(BackendError::ShortBuffer {
                required,
                actual: pixels.len(),
            });
        }
        if width == 0 || height == 0 {
            if let Some(slot) = self.textures.get_mut(&texture) {
                if let Some(old) = slot.take() {
                    old.texture.destroy();
                }
            }
            return Ok(());
        }
        let reuse = self
            .textures
            .get(&texture)
            .and_then(Option::as_ref)
            .is_some_and(|storage| storage.width == width && storage.height == height);
        if !reuse {
            let storage = self.allocate(width, height);
            debug!(target: "osr_wgpu", "allocated {width}x{height} storage for texture {}", texture.get());
            if let Some(Some(old)) = self.textures.insert(texture, Some(storage)) {
                old.texture.destroy();
            }
        }
        let Some(Some(storage)) = self.textures.get(&texture) else {
            return Err(BackendError::UnknownTexture(texture));
        };
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &storage.texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            &pixels[..required],
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * BYTES_PER_PIXEL),
                rows_per_image: Some(height),
            },
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    fn upload_region(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        layout: UnpackLayout,
        region: Rect,
    ) -> Result<(), BackendError> {
        let _span = info_span!(
            "osr_wgpu_upload_region",
            texture = texture.get(),
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height
        )
        .entered();
        let Some(slot) = self.textures.get(&texture) else {
            return Err(BackendError::UnknownTexture(texture));
        };
        let Some(storage) = slot.as_ref() else {
            trace!(target: "osr_wgpu", "region upload before storage exists ignored");
            return Ok(());
        };
        if region.right() > storage.width || region.bottom() > storage.height {
            return Err(BackendError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                texture_width: storage.width,
                texture_height: storage.height,
            });
        }
        let required = layout.required_len(region.width, region.height);
        if pixels.len() < required {
            return Err(BackendError::ShortBuffer {
                required,
                actual: pixels.len(),
            });
        }
        let (data_layout, origin, extent) = region_copy(layout, region);
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &storage.texture,
                mip_level: 0,
                origin,
                aspect: TextureAspect::All,
            },
            pixels,
            data_layout,
            extent,
        );
        Ok(())
    }

    fn set_blend(&mut self, enabled: bool) {
        self.blend = enabled;
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if let Some(Some(storage)) = self.textures.remove(&texture) {
            storage.texture.destroy();
            debug!(target: "osr_wgpu", "destroyed texture {}", texture.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_copy_reads_with_frame_stride() {
        let region = Rect::new(3, 2, 4, 5);
        let (layout, origin, extent) = region_copy(UnpackLayout::for_region(10, region), region);
        assert_eq!(layout.bytes_per_row, Some(40));
        assert_eq!(layout.offset, (2 * 10 + 3) * 4);
        assert_eq!(layout.rows_per_image, Some(5));
        assert_eq!((origin.x, origin.y, origin.z), (3, 2, 0));
        assert_eq!((extent.width, extent.height, extent.depth_or_array_layers), (4, 5, 1));
    }

    #[test]
    fn origin_region_has_no_offset() {
        let region = Rect::full(8, 8);
        let (layout, _, _) = region_copy(UnpackLayout::for_region(8, region), region);
        assert_eq!(layout.offset, 0);
    }
}
