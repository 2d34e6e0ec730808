use osr_core::StandardCursor;

/// Opaque cursor handle issued by the host cursor system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorHandle(pub u64);

/// What the host should show for an engine cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorDisplay {
    Hidden,
    Handle(CursorHandle),
}

/// The host's cursor API.
pub trait CursorSystem {
    /// Create a handle for one of the standard shapes.
    fn create_standard_cursor(&mut self, shape: StandardCursor) -> CursorHandle;

    /// Show the pointer using `handle`.
    fn set_cursor(&mut self, handle: CursorHandle);

    fn hide_cursor(&mut self);
}
