//! Host-native key codes and modifier flags.
//!
//! The host reports keys using GLFW-style codes: printable keys use their
//! upper-case ASCII value, named keys live above 255. Key events are forwarded
//! to the engine with these codes unchanged.

use bitflags::bitflags;

/// A host key code.
pub type KeyCode = i32;

pub const KEY_UNKNOWN: KeyCode = -1;
pub const KEY_SPACE: KeyCode = 32;
pub const KEY_APOSTROPHE: KeyCode = 39;
pub const KEY_COMMA: KeyCode = 44;
pub const KEY_MINUS: KeyCode = 45;
pub const KEY_PERIOD: KeyCode = 46;
pub const KEY_SLASH: KeyCode = 47;
pub const KEY_0: KeyCode = 48;
pub const KEY_1: KeyCode = 49;
pub const KEY_2: KeyCode = 50;
pub const KEY_3: KeyCode = 51;
pub const KEY_4: KeyCode = 52;
pub const KEY_5: KeyCode = 53;
pub const KEY_6: KeyCode = 54;
pub const KEY_7: KeyCode = 55;
pub const KEY_8: KeyCode = 56;
pub const KEY_9: KeyCode = 57;
pub const KEY_SEMICOLON: KeyCode = 59;
pub const KEY_EQUAL: KeyCode = 61;
pub const KEY_A: KeyCode = 65;
pub const KEY_B: KeyCode = 66;
pub const KEY_C: KeyCode = 67;
pub const KEY_D: KeyCode = 68;
pub const KEY_E: KeyCode = 69;
pub const KEY_F: KeyCode = 70;
pub const KEY_G: KeyCode = 71;
pub const KEY_H: KeyCode = 72;
pub const KEY_I: KeyCode = 73;
pub const KEY_J: KeyCode = 74;
pub const KEY_K: KeyCode = 75;
pub const KEY_L: KeyCode = 76;
pub const KEY_M: KeyCode = 77;
pub const KEY_N: KeyCode = 78;
pub const KEY_O: KeyCode = 79;
pub const KEY_P: KeyCode = 80;
pub const KEY_Q: KeyCode = 81;
pub const KEY_R: KeyCode = 82;
pub const KEY_S: KeyCode = 83;
pub const KEY_T: KeyCode = 84;
pub const KEY_U: KeyCode = 85;
pub const KEY_V: KeyCode = 86;
pub const KEY_W: KeyCode = 87;
pub const KEY_X: KeyCode = 88;
pub const KEY_Y: KeyCode = 89;
pub const KEY_Z: KeyCode = 90;
pub const KEY_LEFT_BRACKET: KeyCode = 91;
pub const KEY_BACKSLASH: KeyCode = 92;
pub const KEY_RIGHT_BRACKET: KeyCode = 93;
pub const KEY_GRAVE_ACCENT: KeyCode = 96;
pub const KEY_ESCAPE: KeyCode = 256;
pub const KEY_ENTER: KeyCode = 257;
pub const KEY_TAB: KeyCode = 258;
pub const KEY_BACKSPACE: KeyCode = 259;
pub const KEY_INSERT: KeyCode = 260;
pub const KEY_DELETE: KeyCode = 261;
pub const KEY_RIGHT: KeyCode = 262;
pub const KEY_LEFT: KeyCode = 263;
pub const KEY_DOWN: KeyCode = 264;
pub const KEY_UP: KeyCode = 265;
pub const KEY_PAGE_UP: KeyCode = 266;
pub const KEY_PAGE_DOWN: KeyCode = 267;
pub const KEY_HOME: KeyCode = 268;
pub const KEY_END: KeyCode = 269;
pub const KEY_F1: KeyCode = 290;
pub const KEY_F5: KeyCode = 294;
pub const KEY_F12: KeyCode = 301;
pub const KEY_LEFT_SHIFT: KeyCode = 340;
pub const KEY_LEFT_CONTROL: KeyCode = 341;
pub const KEY_LEFT_ALT: KeyCode = 342;
pub const KEY_LEFT_SUPER: KeyCode = 343;
pub const KEY_RIGHT_SHIFT: KeyCode = 344;
pub const KEY_RIGHT_CONTROL: KeyCode = 345;
pub const KEY_RIGHT_ALT: KeyCode = 346;
pub const KEY_RIGHT_SUPER: KeyCode = 347;

/// Character carried by a key press/release: the key code reinterpreted as a
/// character, or NUL for codes outside the character range.
#[inline]
pub fn key_char(code: KeyCode) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\0')
}

bitflags! {
    /// Host modifier flags as reported alongside key and wheel input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 0x0001;
        const CONTROL = 0x0002;
        const ALT = 0x0004;
        const SUPER = 0x0008;
        const CAPS_LOCK = 0x0010;
        const NUM_LOCK = 0x0020;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_codes_map_to_ascii() {
        assert_eq!(key_char(KEY_R), 'R');
        assert_eq!(key_char(KEY_EQUAL), '=');
        assert_eq!(key_char(KEY_MINUS), '-');
        assert_eq!(key_char(KEY_0), '0');
    }

    #[test]
    fn negative_code_is_nul() {
        assert_eq!(key_char(KEY_UNKNOWN), '\0');
    }
}
