//! Button index translation and the held-button mask.

use osr_core::{ButtonMask, EngineButton, HostButton};

/// Host button index to engine button index. The host numbers middle before
/// right, the engine right before middle. Indices past the table pass through.
pub const HOST_TO_ENGINE_BUTTONS: [(HostButton, EngineButton); 3] = [
    (HostButton::PRIMARY, EngineButton::PRIMARY),
    (HostButton::MIDDLE, EngineButton::MIDDLE),
    (HostButton::RIGHT, EngineButton::RIGHT),
];

/// Translate a host button index into the engine's numbering.
pub fn engine_button(button: HostButton) -> EngineButton {
    HOST_TO_ENGINE_BUTTONS
        .iter()
        .find(|(host, _)| *host == button)
        .map_or(EngineButton(button.0), |(_, engine)| *engine)
}

/// Buttons currently held, one bit per engine button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    mask: ButtonMask,
}

impl ButtonState {
    pub fn mask(&self) -> ButtonMask {
        self.mask
    }

    /// Record a press. Pressing a held button is harmless.
    pub fn press(&mut self, button: EngineButton) {
        if let Some(bit) = button.mask_bit() {
            self.mask.insert(bit);
        }
    }

    /// Record a release. Releasing a button that is not held is a no-op.
    pub fn release(&mut self, button: EngineButton) {
        if let Some(bit) = button.mask_bit() {
            if self.mask.contains(bit) {
                self.mask.remove(bit);
            }
        }
    }

    pub fn clear(&mut self) {
        self.mask = ButtonMask::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_and_right_swap() {
        assert_eq!(engine_button(HostButton::PRIMARY), EngineButton::PRIMARY);
        assert_eq!(engine_button(HostButton(1)), EngineButton(2));
        assert_eq!(engine_button(HostButton(2)), EngineButton(1));
        assert_eq!(engine_button(HostButton(4)), EngineButton(4));
    }

    #[test]
    fn release_clears_only_its_bit() {
        let mut state = ButtonState::default();
        state.press(EngineButton::PRIMARY);
        state.press(EngineButton::RIGHT);
        state.release(EngineButton::PRIMARY);
        assert_eq!(state.mask(), ButtonMask::BUTTON2);
    }

    #[test]
    fn duplicate_release_is_noop() {
        let mut state = ButtonState::default();
        state.press(EngineButton::MIDDLE);
        state.release(EngineButton::MIDDLE);
        state.release(EngineButton::MIDDLE);
        assert_eq!(state.mask(), ButtonMask::empty());
        state.release(EngineButton::RIGHT);
        assert_eq!(state.mask(), ButtonMask::empty());
    }
}
