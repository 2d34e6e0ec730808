//! The browser surface widget.
//!
//! `BrowserSurface` ties one engine browser to a texture, a drag session and
//! an input translator. The host drives it from its main thread: input goes
//! in through the `mouse_*`/`key_*` entry points, engine callbacks arrive on
//! any thread through a `SurfaceHandle` and are applied by `pump`, and the
//! renderer samples `texture()` while drawing.

mod callback;
mod config;
mod error;
mod factory;
mod surface;

pub use callback::{EngineCallback, Frame, SurfaceHandle};
pub use config::BridgeConfig;
pub use error::SurfaceError;
pub use factory::{EngineFactory, SurfaceFactory};
pub use surface::{BrowserSurface, CursorListener};
