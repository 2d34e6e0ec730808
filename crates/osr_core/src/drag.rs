//! Drag-and-drop operations negotiated between the engine and the drop target.

use bitflags::bitflags;

bitflags! {
    /// Allowed or negotiated drag effects. An empty set means "no drop".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DragOperation: u32 {
        const COPY = 1;
        const LINK = 2;
        const GENERIC = 4;
        const PRIVATE = 8;
        const MOVE = 16;
        const DELETE = 32;
    }
}
