//! Cursor substitutions applied while a drag is in progress.

use osr_core::{CursorType, DragOperation};

/// Replace `from` with `to` whenever `applies` holds for the negotiated
/// operation.
#[derive(Debug, Clone, Copy)]
pub struct CursorSubstitution {
    pub from: CursorType,
    pub to: CursorType,
    pub applies: fn(DragOperation) -> bool,
}

fn lacks_copy(operation: DragOperation) -> bool {
    !operation.contains(DragOperation::COPY)
}

fn has_copy(operation: DragOperation) -> bool {
    operation.contains(DragOperation::COPY)
}

/// The engine shows a copy cursor for drops it would refuse and a no-drop
/// cursor for drops the target accepts as copies.
pub const CURSOR_SUBSTITUTIONS: [CursorSubstitution; 2] = [
    CursorSubstitution {
        from: CursorType::Copy,
        to: CursorType::NoDrop,
        applies: lacks_copy,
    },
    CursorSubstitution {
        from: CursorType::NoDrop,
        to: CursorType::Copy,
        applies: has_copy,
    },
];

/// Cursor to display for `requested` under `operation`.
pub fn substitute_cursor(requested: CursorType, operation: DragOperation) -> CursorType {
    CURSOR_SUBSTITUTIONS
        .iter()
        .find(|entry| entry.from == requested && (entry.applies)(operation))
        .map_or(requested, |entry| entry.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_without_copy_operation_becomes_no_drop() {
        assert_eq!(substitute_cursor(CursorType::Copy, DragOperation::MOVE), CursorType::NoDrop);
        assert_eq!(substitute_cursor(CursorType::Copy, DragOperation::empty()), CursorType::NoDrop);
    }

    #[test]
    fn no_drop_with_copy_operation_becomes_copy() {
        assert_eq!(
            substitute_cursor(CursorType::NoDrop, DragOperation::COPY | DragOperation::MOVE),
            CursorType::Copy
        );
    }

    #[test]
    fn matching_cursors_are_kept() {
        assert_eq!(substitute_cursor(CursorType::Copy, DragOperation::COPY), CursorType::Copy);
        assert_eq!(substitute_cursor(CursorType::NoDrop, DragOperation::LINK), CursorType::NoDrop);
        assert_eq!(substitute_cursor(CursorType::Hand, DragOperation::empty()), CursorType::Hand);
    }
}
