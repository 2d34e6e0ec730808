//! Engine-side input events and the engine's mouse button convention.
//!
//! The engine encodes held mouse buttons inside the modifier field of every
//! mouse event, one bit per button, so the mask doubles as a modifier value.

use bitflags::bitflags;

use crate::keys::{KeyCode, Modifiers};

/// A mouse button index as reported by the host: 0 primary, 1 middle, 2 right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostButton(pub u8);

impl HostButton {
    pub const PRIMARY: Self = Self(0);
    pub const MIDDLE: Self = Self(1);
    pub const RIGHT: Self = Self(2);
}

/// A mouse button index in the engine's convention: 0 primary, 1 right, 2 middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineButton(pub u8);

impl EngineButton {
    pub const PRIMARY: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);

    /// The mask bit tracking this button, if the engine tracks it.
    #[inline]
    pub const fn mask_bit(self) -> Option<ButtonMask> {
        match self.0 {
            0 => Some(ButtonMask::BUTTON1),
            1 => Some(ButtonMask::BUTTON2),
            2 => Some(ButtonMask::BUTTON3),
            _ => None,
        }
    }
}

bitflags! {
    /// Held mouse buttons, in the engine's bit layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u32 {
        const BUTTON3 = 1 << 2;
        const BUTTON2 = 1 << 3;
        const BUTTON1 = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Pressed,
    Released,
    Typed,
}

/// A keyboard event forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key_code: KeyCode,
    pub key_char: char,
    pub modifiers: Modifiers,
    /// Platform scan code; only press and release carry one.
    pub scan_code: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Moved,
    Pressed,
    Released,
}

/// A pointer event forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: i32,
    pub y: i32,
    pub click_count: u32,
    pub button: EngineButton,
    pub modifiers: ButtonMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelEventKind {
    /// Amount is expressed in scroll units (lines), not pixels.
    UnitScroll,
}

/// A wheel event forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub kind: WheelEventKind,
    pub x: i32,
    pub y: i32,
    pub amount: f64,
    pub modifiers: Modifiers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_tracked_button_has_a_distinct_bit() {
        let bits: Vec<ButtonMask> = (0..3)
            .filter_map(|index| EngineButton(index).mask_bit())
            .collect();
        assert_eq!(bits.len(), 3);
        assert_eq!(
            bits.iter().fold(ButtonMask::empty(), |acc, bit| acc | *bit),
            ButtonMask::all()
        );
    }

    #[test]
    fn extra_buttons_are_untracked() {
        assert_eq!(EngineButton(3).mask_bit(), None);
        assert_eq!(EngineButton(7).mask_bit(), None);
    }
}
