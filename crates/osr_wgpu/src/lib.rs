//! wgpu implementation of the browser frame texture.
//!
//! `WgpuTextureBackend` stores each browser frame in a `Bgra8Unorm` texture
//! and writes dirty regions straight from the engine's full-frame buffer
//! through the queue. `TexturePresenter` samples that texture into a host
//! render pass. `GpuContext` owns the device and window surface for hosts
//! that have none of their own.
#![allow(
    clippy::min_ident_chars,
    clippy::missing_docs_in_private_items,
    clippy::missing_inline_in_public_items,
    clippy::absolute_paths,
    clippy::cast_lossless,
    clippy::default_numeric_fallback,
    clippy::too_many_lines,
    clippy::std_instead_of_core,
    clippy::default_trait_access,
    clippy::missing_errors_doc,
    clippy::needless_raw_strings,
    clippy::needless_raw_string_hashes,
    reason = "GPU code uses short names for coordinates, numeric casts for texel math and WGPU descriptor defaults"
)]

mod backend;
mod gpu_context;
mod presenter;

pub use backend::{FRAME_FORMAT, WgpuTextureBackend, region_copy};
pub use gpu_context::GpuContext;
pub use presenter::TexturePresenter;
