//! winit input to host key, modifier and button codes.

use osr_core::keys::*;
use osr_core::{HostButton, KeyCode, Modifiers};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode as WinitKey, ModifiersState, PhysicalKey};

const LETTERS: [(WinitKey, KeyCode); 26] = [
    (WinitKey::KeyA, KEY_A),
    (WinitKey::KeyB, KEY_B),
    (WinitKey::KeyC, KEY_C),
    (WinitKey::KeyD, KEY_D),
    (WinitKey::KeyE, KEY_E),
    (WinitKey::KeyF, KEY_F),
    (WinitKey::KeyG, KEY_G),
    (WinitKey::KeyH, KEY_H),
    (WinitKey::KeyI, KEY_I),
    (WinitKey::KeyJ, KEY_J),
    (WinitKey::KeyK, KEY_K),
    (WinitKey::KeyL, KEY_L),
    (WinitKey::KeyM, KEY_M),
    (WinitKey::KeyN, KEY_N),
    (WinitKey::KeyO, KEY_O),
    (WinitKey::KeyP, KEY_P),
    (WinitKey::KeyQ, KEY_Q),
    (WinitKey::KeyR, KEY_R),
    (WinitKey::KeyS, KEY_S),
    (WinitKey::KeyT, KEY_T),
    (WinitKey::KeyU, KEY_U),
    (WinitKey::KeyV, KEY_V),
    (WinitKey::KeyW, KEY_W),
    (WinitKey::KeyX, KEY_X),
    (WinitKey::KeyY, KEY_Y),
    (WinitKey::KeyZ, KEY_Z),
];

const OTHERS: [(WinitKey, KeyCode); 46] = [
    (WinitKey::Digit0, KEY_0),
    (WinitKey::Digit1, KEY_1),
    (WinitKey::Digit2, KEY_2),
    (WinitKey::Digit3, KEY_3),
    (WinitKey::Digit4, KEY_4),
    (WinitKey::Digit5, KEY_5),
    (WinitKey::Digit6, KEY_6),
    (WinitKey::Digit7, KEY_7),
    (WinitKey::Digit8, KEY_8),
    (WinitKey::Digit9, KEY_9),
    (WinitKey::Space, KEY_SPACE),
    (WinitKey::Quote, KEY_APOSTROPHE),
    (WinitKey::Comma, KEY_COMMA),
    (WinitKey::Minus, KEY_MINUS),
    (WinitKey::Period, KEY_PERIOD),
    (WinitKey::Slash, KEY_SLASH),
    (WinitKey::Semicolon, KEY_SEMICOLON),
    (WinitKey::Equal, KEY_EQUAL),
    (WinitKey::BracketLeft, KEY_LEFT_BRACKET),
    (WinitKey::Backslash, KEY_BACKSLASH),
    (WinitKey::BracketRight, KEY_RIGHT_BRACKET),
    (WinitKey::Backquote, KEY_GRAVE_ACCENT),
    (WinitKey::Escape, KEY_ESCAPE),
    (WinitKey::Enter, KEY_ENTER),
    (WinitKey::Tab, KEY_TAB),
    (WinitKey::Backspace, KEY_BACKSPACE),
    (WinitKey::Insert, KEY_INSERT),
    (WinitKey::Delete, KEY_DELETE),
    (WinitKey::ArrowRight, KEY_RIGHT),
    (WinitKey::ArrowLeft, KEY_LEFT),
    (WinitKey::ArrowDown, KEY_DOWN),
    (WinitKey::ArrowUp, KEY_UP),
    (WinitKey::PageUp, KEY_PAGE_UP),
    (WinitKey::PageDown, KEY_PAGE_DOWN),
    (WinitKey::Home, KEY_HOME),
    (WinitKey::End, KEY_END),
    (WinitKey::F1, KEY_F1),
    (WinitKey::F5, KEY_F5),
    (WinitKey::F12, KEY_F12),
    (WinitKey::ShiftLeft, KEY_LEFT_SHIFT),
    (WinitKey::ControlLeft, KEY_LEFT_CONTROL),
    (WinitKey::AltLeft, KEY_LEFT_ALT),
    (WinitKey::SuperLeft, KEY_LEFT_SUPER),
    (WinitKey::ShiftRight, KEY_RIGHT_SHIFT),
    (WinitKey::ControlRight, KEY_RIGHT_CONTROL),
    (WinitKey::AltRight, KEY_RIGHT_ALT),
];

/// Host key code for a physical key; unmapped keys are `KEY_UNKNOWN`.
pub fn host_key(key: PhysicalKey) -> KeyCode {
    let PhysicalKey::Code(code) = key else {
        return KEY_UNKNOWN;
    };
    LETTERS
        .iter()
        .chain(OTHERS.iter())
        .find(|(winit_key, _)| *winit_key == code)
        .map_or(KEY_UNKNOWN, |(_, host)| *host)
}

pub fn host_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers.set(Modifiers::SUPER, state.super_key());
    modifiers
}

/// Host button index, `None` for buttons the bridge does not track.
pub fn host_button(button: MouseButton) -> Option<HostButton> {
    match button {
        MouseButton::Left => Some(HostButton::PRIMARY),
        MouseButton::Middle => Some(HostButton::MIDDLE),
        MouseButton::Right => Some(HostButton::RIGHT),
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn letters_and_chord_keys_map() {
        assert_eq!(host_key(PhysicalKey::Code(WinitKey::KeyR)), KEY_R);
        assert_eq!(host_key(PhysicalKey::Code(WinitKey::Equal)), KEY_EQUAL);
        assert_eq!(host_key(PhysicalKey::Code(WinitKey::ArrowLeft)), KEY_LEFT);
        assert_eq!(host_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)), KEY_UNKNOWN);
    }

    #[test]
    fn modifiers_map_bit_for_bit() {
        let state = ModifiersState::CONTROL | ModifiersState::SHIFT;
        assert_eq!(host_modifiers(state), Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(host_modifiers(ModifiersState::empty()), Modifiers::empty());
    }

    #[test]
    fn buttons_keep_host_numbering() {
        assert_eq!(host_button(MouseButton::Right), Some(HostButton::RIGHT));
        assert_eq!(host_button(MouseButton::Middle), Some(HostButton::MIDDLE));
        assert_eq!(host_button(MouseButton::Back), None);
    }
}
