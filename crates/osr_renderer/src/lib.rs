//! Texture-backed frame store for off-screen browser frames.
//!
//! `PixelSurface` receives BGRA frames from the engine and keeps one GPU
//! texture in sync with them, uploading only dirty regions when the frame size
//! is unchanged. The GPU itself sits behind `TextureBackend`; `MemoryBackend`
//! is a CPU backing store with the same unpack semantics, used for headless
//! hosts and tests.

pub mod backend;
pub mod error;
pub mod memory;
pub mod surface;

pub use backend::{BYTES_PER_PIXEL, TextureBackend, TextureId, UnpackLayout};
pub use error::{BackendError, RenderError};
pub use memory::{MemoryBackend, MemoryTexture, UploadStats};
pub use surface::{FrameOutcome, PixelSurface};
