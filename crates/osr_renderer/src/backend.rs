//! The seam between `PixelSurface` and whatever owns GPU textures.

use core::num::NonZeroU32;

use osr_core::Rect;

use crate::error::BackendError;

/// Frames are tightly packed BGRA, four bytes per pixel.
pub const BYTES_PER_PIXEL: u32 = 4;

/// A live texture. Never zero; "no texture" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    /// Wrap a raw handle, rejecting the reserved zero.
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Where a sub-rectangle's pixels start inside a full-frame buffer.
///
/// Mirrors the classic unpack state: `row_length` is the stride of the source
/// buffer in pixels, `skip_pixels`/`skip_rows` the offset of the first pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnpackLayout {
    pub row_length: u32,
    pub skip_pixels: u32,
    pub skip_rows: u32,
}

impl UnpackLayout {
    /// Layout addressing `region` inside a buffer `row_length` pixels wide.
    #[inline]
    pub const fn for_region(row_length: u32, region: Rect) -> Self {
        Self {
            row_length,
            skip_pixels: region.x,
            skip_rows: region.y,
        }
    }

    /// Source stride in bytes.
    #[inline]
    pub const fn bytes_per_row(&self) -> usize {
        self.row_length as usize * BYTES_PER_PIXEL as usize
    }

    /// Byte offset of the first pixel to read.
    #[inline]
    pub const fn byte_offset(&self) -> usize {
        (self.skip_rows as usize * self.row_length as usize + self.skip_pixels as usize)
            * BYTES_PER_PIXEL as usize
    }

    /// Bytes the source buffer must hold to read a `width` x `height` block.
    pub const fn required_len(&self, width: u32, height: u32) -> usize {
        if width == 0 || height == 0 {
            return 0;
        }
        self.byte_offset()
            + (height as usize - 1) * self.bytes_per_row()
            + width as usize * BYTES_PER_PIXEL as usize
    }
}

/// GPU texture operations used by `PixelSurface`.
///
/// Every method must be called on the host's render thread.
pub trait TextureBackend {
    /// Allocate a texture handle without storage.
    fn create_texture(&mut self) -> Result<TextureId, BackendError>;

    /// (Re)allocate storage at `width` x `height` and fill it from `pixels`.
    fn upload_full(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), BackendError>;

    /// Write `region` of the texture from `pixels`, reading with `layout`.
    fn upload_region(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        layout: UnpackLayout,
        region: Rect,
    ) -> Result<(), BackendError>;

    /// Toggle alpha blending for the draw call that samples the texture.
    fn set_blend(&mut self, enabled: bool);

    /// Release the texture. Unknown handles are ignored.
    fn delete_texture(&mut self, texture: TextureId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_texture() {
        assert_eq!(TextureId::new(0), None);
        assert_eq!(TextureId::new(7).map(TextureId::get), Some(7));
    }

    #[test]
    fn layout_offsets_follow_stride() {
        let layout = UnpackLayout::for_region(100, Rect::new(3, 2, 10, 5));
        assert_eq!(layout.bytes_per_row(), 400);
        assert_eq!(layout.byte_offset(), (2 * 100 + 3) * 4);
        assert_eq!(layout.required_len(10, 5), layout.byte_offset() + 4 * 400 + 40);
        assert_eq!(layout.required_len(0, 5), 0);
    }
}
