//! CPU backing store implementing `TextureBackend`.
//!
//! Uploads copy bytes exactly as a GPU would under the given unpack layout, so
//! the store can stand in for a real texture when verifying which pixels a
//! frame touched.

use std::collections::BTreeMap;

use osr_core::Rect;

use crate::backend::{BYTES_PER_PIXEL, TextureBackend, TextureId, UnpackLayout};
use crate::error::BackendError;

/// Storage of one in-memory texture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl MemoryTexture {
    /// The four bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL as usize;
        let bytes = self.pixels.get(start..start + BYTES_PER_PIXEL as usize)?;
        let mut out = [0_u8; 4];
        out.copy_from_slice(bytes);
        Some(out)
    }
}

/// Counters describing the traffic a backend has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub full_uploads: u64,
    pub region_uploads: u64,
    pub bytes_uploaded: u64,
}

/// In-memory `TextureBackend`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    textures: BTreeMap<TextureId, MemoryTexture>,
    next_id: u32,
    blend_enabled: bool,
    stats: UploadStats,
    deleted: Vec<TextureId>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self, texture: TextureId) -> Option<&MemoryTexture> {
        self.textures.get(&texture)
    }

    /// Number of live textures.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn blend_enabled(&self) -> bool {
        self.blend_enabled
    }

    pub fn stats(&self) -> UploadStats {
        self.stats
    }

    /// Textures released so far, in release order.
    pub fn deleted(&self) -> &[TextureId] {
        &self.deleted
    }

    fn storage_mut(&mut self, texture: TextureId) -> Result<&mut MemoryTexture, BackendError> {
        self.textures
            .get_mut(&texture)
            .ok_or(BackendError::UnknownTexture(texture))
    }
}

impl TextureBackend for MemoryBackend {
    fn create_texture(&mut self) -> Result<TextureId, BackendError> {
        self.next_id = self.next_id.saturating_add(1);
        let id = TextureId::new(self.next_id)
            .ok_or_else(|| BackendError::Gpu("texture ids exhausted".to_owned()))?;
        self.textures.insert(id, MemoryTexture::default());
        Ok(id)
    }

    fn upload_full(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), BackendError> {
        let len = width as usize * height as usize * BYTES_PER_PIXEL as usize;
        let source = pixels.get(..len).ok_or(BackendError::ShortBuffer {
            required: len,
            actual: pixels.len(),
        })?;
        let storage = self.storage_mut(texture)?;
        storage.width = width;
        storage.height = height;
        storage.pixels.clear();
        storage.pixels.extend_from_slice(source);
        self.stats.full_uploads += 1;
        self.stats.bytes_uploaded += len as u64;
        Ok(())
    }

    fn upload_region(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        layout: UnpackLayout,
        region: Rect,
    ) -> Result<(), BackendError> {
        let required = layout.required_len(region.width, region.height);
        if pixels.len() < required {
            return Err(BackendError::ShortBuffer {
                required,
                actual: pixels.len(),
            });
        }
        let storage = self.storage_mut(texture)?;
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
        let row_bytes = region.width as usize * BYTES_PER_PIXEL as usize;
        let dst_stride = storage.width as usize * BYTES_PER_PIXEL as usize;
        for row in 0..region.height as usize {
            let src = layout.byte_offset() + row * layout.bytes_per_row();
            let dst = (region.y as usize + row) * dst_stride
                + region.x as usize * BYTES_PER_PIXEL as usize;
            storage.pixels[dst..dst + row_bytes].copy_from_slice(&pixels[src..src + row_bytes]);
        }
        self.stats.region_uploads += 1;
        self.stats.bytes_uploaded += (row_bytes * region.height as usize) as u64;
        Ok(())
    }

    fn set_blend(&mut self, enabled: bool) {
        self.blend_enabled = enabled;
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.deleted.push(texture);
        }
    }
}
