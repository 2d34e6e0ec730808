//! Host cursor handles for engine cursor types.
//!
//! The engine names cursors by `CursorType`; the host displays opaque
//! handles created by its cursor system. `CursorCache` creates each handle
//! on first use and keeps it for the life of the process.

mod cache;
mod system;

pub use cache::{CursorCache, cursor_listener, default_listener};
pub use system::{CursorDisplay, CursorHandle, CursorSystem};
