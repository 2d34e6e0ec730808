//! Engine cursor types and the host's standard cursor shapes.
//!
//! The engine reports cursor changes as a small closed enumeration. The host
//! can only display a handful of standard shapes, so several engine cursors
//! share one host shape.

/// Cursor requested by the engine, numbered as the engine numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum CursorType {
    Pointer = 0,
    Cross = 1,
    Hand = 2,
    IBeam = 3,
    Wait = 4,
    Help = 5,
    EastResize = 6,
    NorthResize = 7,
    NorthEastResize = 8,
    NorthWestResize = 9,
    SouthResize = 10,
    SouthEastResize = 11,
    SouthWestResize = 12,
    WestResize = 13,
    NorthSouthResize = 14,
    EastWestResize = 15,
    NorthEastSouthWestResize = 16,
    NorthWestSouthEastResize = 17,
    ColumnResize = 18,
    RowResize = 19,
    MiddlePanning = 20,
    EastPanning = 21,
    NorthPanning = 22,
    NorthEastPanning = 23,
    NorthWestPanning = 24,
    SouthPanning = 25,
    SouthEastPanning = 26,
    SouthWestPanning = 27,
    WestPanning = 28,
    Move = 29,
    VerticalText = 30,
    Cell = 31,
    ContextMenu = 32,
    Alias = 33,
    Progress = 34,
    NoDrop = 35,
    Copy = 36,
    None = 37,
    NotAllowed = 38,
    ZoomIn = 39,
    ZoomOut = 40,
    Grab = 41,
    Grabbing = 42,
    MiddlePanningVertical = 43,
    MiddlePanningHorizontal = 44,
    Custom = 45,
    DndNone = 46,
    DndMove = 47,
    DndCopy = 48,
    DndLink = 49,
}

/// Every cursor type, ordered by engine id.
pub const ALL_CURSOR_TYPES: [CursorType; 50] = [
    CursorType::Pointer,
    CursorType::Cross,
    CursorType::Hand,
    CursorType::IBeam,
    CursorType::Wait,
    CursorType::Help,
    CursorType::EastResize,
    CursorType::NorthResize,
    CursorType::NorthEastResize,
    CursorType::NorthWestResize,
    CursorType::SouthResize,
    CursorType::SouthEastResize,
    CursorType::SouthWestResize,
    CursorType::WestResize,
    CursorType::NorthSouthResize,
    CursorType::EastWestResize,
    CursorType::NorthEastSouthWestResize,
    CursorType::NorthWestSouthEastResize,
    CursorType::ColumnResize,
    CursorType::RowResize,
    CursorType::MiddlePanning,
    CursorType::EastPanning,
    CursorType::NorthPanning,
    CursorType::NorthEastPanning,
    CursorType::NorthWestPanning,
    CursorType::SouthPanning,
    CursorType::SouthEastPanning,
    CursorType::SouthWestPanning,
    CursorType::WestPanning,
    CursorType::Move,
    CursorType::VerticalText,
    CursorType::Cell,
    CursorType::ContextMenu,
    CursorType::Alias,
    CursorType::Progress,
    CursorType::NoDrop,
    CursorType::Copy,
    CursorType::None,
    CursorType::NotAllowed,
    CursorType::ZoomIn,
    CursorType::ZoomOut,
    CursorType::Grab,
    CursorType::Grabbing,
    CursorType::MiddlePanningVertical,
    CursorType::MiddlePanningHorizontal,
    CursorType::Custom,
    CursorType::DndNone,
    CursorType::DndMove,
    CursorType::DndCopy,
    CursorType::DndLink,
];

impl CursorType {
    /// Look up a cursor by engine id.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|index| ALL_CURSOR_TYPES.get(index))
            .copied()
    }

    /// Look up a cursor by engine id, falling back to the arrow pointer for
    /// ids outside the enumeration.
    pub fn from_id_or_pointer(id: i32) -> Self {
        Self::from_id(id).unwrap_or(Self::Pointer)
    }

    /// Engine id of this cursor.
    #[inline]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// The host shape used to display this cursor.
    pub const fn standard_shape(self) -> StandardCursor {
        match self {
            Self::Cross | Self::Cell => StandardCursor::Crosshair,
            Self::Hand | Self::Grab | Self::Grabbing | Self::DndLink => StandardCursor::PointingHand,
            Self::IBeam | Self::VerticalText => StandardCursor::IBeam,
            Self::EastResize | Self::WestResize | Self::EastWestResize | Self::ColumnResize => {
                StandardCursor::ResizeEastWest
            }
            Self::NorthResize | Self::SouthResize | Self::NorthSouthResize | Self::RowResize => {
                StandardCursor::ResizeNorthSouth
            }
            Self::NorthWestResize | Self::SouthEastResize | Self::NorthWestSouthEastResize => {
                StandardCursor::ResizeNorthWestSouthEast
            }
            Self::NorthEastResize | Self::SouthWestResize | Self::NorthEastSouthWestResize => {
                StandardCursor::ResizeNorthEastSouthWest
            }
            Self::Move
            | Self::MiddlePanning
            | Self::EastPanning
            | Self::NorthPanning
            | Self::NorthEastPanning
            | Self::NorthWestPanning
            | Self::SouthPanning
            | Self::SouthEastPanning
            | Self::SouthWestPanning
            | Self::WestPanning
            | Self::MiddlePanningVertical
            | Self::MiddlePanningHorizontal
            | Self::DndMove => StandardCursor::ResizeAll,
            Self::NoDrop | Self::NotAllowed | Self::DndNone => StandardCursor::NotAllowed,
            Self::Pointer
            | Self::Wait
            | Self::Help
            | Self::ContextMenu
            | Self::Alias
            | Self::Progress
            | Self::Copy
            | Self::None
            | Self::ZoomIn
            | Self::ZoomOut
            | Self::Custom
            | Self::DndCopy => StandardCursor::Arrow,
        }
    }
}

/// Standard cursor shapes every host cursor system can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardCursor {
    Arrow,
    IBeam,
    Crosshair,
    PointingHand,
    ResizeEastWest,
    ResizeNorthSouth,
    ResizeNorthWestSouthEast,
    ResizeNorthEastSouthWest,
    ResizeAll,
    NotAllowed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_table() {
        for (index, cursor) in ALL_CURSOR_TYPES.iter().enumerate() {
            assert_eq!(cursor.id() as usize, index);
            assert_eq!(CursorType::from_id(cursor.id()), Some(*cursor));
        }
    }

    #[test]
    fn unknown_ids_fall_back_to_pointer() {
        assert_eq!(CursorType::from_id(-1), None);
        assert_eq!(CursorType::from_id(50), None);
        assert_eq!(CursorType::from_id_or_pointer(999), CursorType::Pointer);
    }

    #[test]
    fn drag_cursors_have_distinct_shapes() {
        assert_eq!(CursorType::NoDrop.standard_shape(), StandardCursor::NotAllowed);
        assert_eq!(CursorType::Copy.standard_shape(), StandardCursor::Arrow);
        assert_eq!(CursorType::IBeam.standard_shape(), StandardCursor::IBeam);
    }
}
