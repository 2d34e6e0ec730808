use thiserror::Error;

use crate::backend::TextureId;

/// Failures reported by a texture backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("texture {0:?} does not exist")]
    UnknownTexture(TextureId),
    #[error("region {x},{y} {width}x{height} exceeds texture {texture_width}x{texture_height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        texture_width: u32,
        texture_height: u32,
    },
    #[error("pixel buffer holds {actual} bytes, upload reads up to {required}")]
    ShortBuffer { required: usize, actual: usize },
    #[error("gpu error: {0}")]
    Gpu(String),
}

/// Failures applying a frame to a `PixelSurface`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("frame buffer holds {actual} bytes, {expected} expected for the frame size")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("texture accessed off the render thread")]
    OffRenderThread,
    #[error(transparent)]
    Backend(#[from] BackendError),
}
