//! `InputTranslator`: the per-surface input pipeline.

use log::trace;
use osr_core::keys::key_char;
use osr_core::{
    ButtonMask, EngineButton, HostButton, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind,
    Navigability, WheelEvent, WheelEventKind,
};

use crate::buttons::{ButtonState, engine_button};
use crate::shortcuts::{BrowserAction, ShortcutMap};
use crate::wheel::WheelPolicy;

/// Outcome of translating one host input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch<T> {
    /// Send this event to the engine.
    Forward(T),
    /// Perform this action locally; nothing reaches the engine.
    Action(BrowserAction),
    /// Drop the event; its chord was handled on press.
    Swallow,
}

impl<T> Dispatch<T> {
    pub fn forwarded(self) -> Option<T> {
        match self {
            Self::Forward(event) => Some(event),
            Self::Action(_) | Self::Swallow => None,
        }
    }
}

/// Translates host input into engine events for one surface.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    shortcuts: ShortcutMap,
    wheel: WheelPolicy,
    buttons: ButtonState,
    browser_controls: bool,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(ShortcutMap::default(), WheelPolicy::default(), true)
    }
}

impl InputTranslator {
    pub fn new(shortcuts: ShortcutMap, wheel: WheelPolicy, browser_controls: bool) -> Self {
        Self {
            shortcuts,
            wheel,
            buttons: ButtonState::default(),
            browser_controls,
        }
    }

    pub fn browser_controls(&self) -> bool {
        self.browser_controls
    }

    pub fn set_browser_controls(&mut self, enabled: bool) {
        self.browser_controls = enabled;
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMap {
        &mut self.shortcuts
    }

    pub fn wheel_policy(&self) -> WheelPolicy {
        self.wheel
    }

    pub fn set_wheel_policy(&mut self, policy: WheelPolicy) {
        self.wheel = policy;
    }

    /// Buttons currently held, in engine layout.
    pub fn button_mask(&self) -> ButtonMask {
        self.buttons.mask()
    }

    fn intercepted(&self, key: KeyCode, modifiers: Modifiers, navigability: Navigability) -> Option<BrowserAction> {
        if !self.browser_controls {
            return None;
        }
        self.shortcuts.lookup(key, modifiers, navigability)
    }

    pub fn key_press(
        &self,
        key_code: KeyCode,
        scan_code: u64,
        modifiers: Modifiers,
        navigability: Navigability,
    ) -> Dispatch<KeyEvent> {
        if let Some(action) = self.intercepted(key_code, modifiers, navigability) {
            trace!(target: "osr_input", "key {key_code} intercepted as {action:?}");
            return Dispatch::Action(action);
        }
        Dispatch::Forward(KeyEvent {
            kind: KeyEventKind::Pressed,
            key_code,
            key_char: key_char(key_code),
            modifiers,
            scan_code: Some(scan_code),
        })
    }

    pub fn key_release(
        &self,
        key_code: KeyCode,
        scan_code: u64,
        modifiers: Modifiers,
        navigability: Navigability,
    ) -> Dispatch<KeyEvent> {
        if self.intercepted(key_code, modifiers, navigability).is_some() {
            return Dispatch::Swallow;
        }
        Dispatch::Forward(KeyEvent {
            kind: KeyEventKind::Released,
            key_code,
            key_char: key_char(key_code),
            modifiers,
            scan_code: Some(scan_code),
        })
    }

    /// A typed character. It is matched against bound chords by its
    /// upper-case code, the way printable key codes are numbered.
    pub fn key_typed(&self, character: char, modifiers: Modifiers, navigability: Navigability) -> Dispatch<KeyEvent> {
        let code = KeyCode::try_from(u32::from(character)).unwrap_or(KeyCode::MAX);
        let chord_code = KeyCode::try_from(u32::from(character.to_ascii_uppercase())).unwrap_or(KeyCode::MAX);
        if self.intercepted(chord_code, modifiers, navigability).is_some() {
            return Dispatch::Swallow;
        }
        Dispatch::Forward(KeyEvent {
            kind: KeyEventKind::Typed,
            key_code: code,
            key_char: character,
            modifiers,
            scan_code: None,
        })
    }

    /// Pointer motion. `modifiers` is the button mask to report, which the
    /// caller may have replaced with drag-time virtual modifiers.
    pub fn mouse_move(&self, x: i32, y: i32, modifiers: ButtonMask) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Moved,
            x,
            y,
            click_count: 0,
            button: EngineButton::PRIMARY,
            modifiers,
        }
    }

    pub fn mouse_press(&mut self, x: i32, y: i32, button: HostButton) -> MouseEvent {
        let button = engine_button(button);
        self.buttons.press(button);
        MouseEvent {
            kind: MouseEventKind::Pressed,
            x,
            y,
            click_count: 1,
            button,
            modifiers: self.buttons.mask(),
        }
    }

    pub fn mouse_release(&mut self, x: i32, y: i32, button: HostButton) -> MouseEvent {
        let button = engine_button(button);
        self.buttons.release(button);
        MouseEvent {
            kind: MouseEventKind::Released,
            x,
            y,
            click_count: 1,
            button,
            modifiers: self.buttons.mask(),
        }
    }

    /// Wheel input. With Ctrl held each event is one zoom step; a zero delta
    /// under Ctrl is swallowed.
    pub fn mouse_wheel(&self, x: i32, y: i32, delta: f64, modifiers: Modifiers) -> Dispatch<WheelEvent> {
        if self.browser_controls && modifiers.contains(Modifiers::CONTROL) {
            return if delta > 0.0 {
                Dispatch::Action(BrowserAction::ZoomIn)
            } else if delta < 0.0 {
                Dispatch::Action(BrowserAction::ZoomOut)
            } else {
                Dispatch::Swallow
            };
        }
        Dispatch::Forward(WheelEvent {
            kind: WheelEventKind::UnitScroll,
            x,
            y,
            amount: self.wheel.scroll_amount(delta),
            modifiers,
        })
    }

    /// Forget held buttons, e.g. when the surface loses focus or closes.
    pub fn reset_buttons(&mut self) {
        self.buttons.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osr_core::keys::{KEY_A, KEY_EQUAL, KEY_R};

    #[test]
    fn press_forwards_scan_code() {
        let translator = InputTranslator::default();
        let event = translator
            .key_press(KEY_A, 30, Modifiers::SHIFT, Navigability::default())
            .forwarded()
            .unwrap();
        assert_eq!(event.kind, KeyEventKind::Pressed);
        assert_eq!(event.key_char, 'A');
        assert_eq!(event.scan_code, Some(30));
        assert_eq!(event.modifiers, Modifiers::SHIFT);
    }

    #[test]
    fn ctrl_r_press_is_action_release_swallowed() {
        let translator = InputTranslator::default();
        let nav = Navigability::default();
        assert_eq!(
            translator.key_press(KEY_R, 19, Modifiers::CONTROL, nav),
            Dispatch::Action(BrowserAction::Reload)
        );
        assert_eq!(translator.key_release(KEY_R, 19, Modifiers::CONTROL, nav), Dispatch::Swallow);
        assert_eq!(translator.key_typed('r', Modifiers::CONTROL, nav), Dispatch::Swallow);
        assert_eq!(translator.key_typed('=', Modifiers::CONTROL, nav), Dispatch::Swallow);
    }

    #[test]
    fn typed_without_chord_is_forwarded() {
        let translator = InputTranslator::default();
        let event = translator
            .key_typed('r', Modifiers::empty(), Navigability::default())
            .forwarded()
            .unwrap();
        assert_eq!(event.kind, KeyEventKind::Typed);
        assert_eq!(event.key_code, i32::from(b'r'));
        assert_eq!(event.scan_code, None);
    }

    #[test]
    fn disabled_controls_forward_everything() {
        let mut translator = InputTranslator::default();
        translator.set_browser_controls(false);
        let nav = Navigability::BOTH;
        assert!(matches!(
            translator.key_press(KEY_EQUAL, 13, Modifiers::CONTROL, nav),
            Dispatch::Forward(_)
        ));
        assert!(matches!(
            translator.mouse_wheel(0, 0, 1.0, Modifiers::CONTROL),
            Dispatch::Forward(_)
        ));
    }

    #[test]
    fn press_release_swap_and_mask() {
        let mut translator = InputTranslator::default();
        let press = translator.mouse_press(5, 6, HostButton(1));
        assert_eq!(press.button, EngineButton(2));
        assert_eq!(press.modifiers, ButtonMask::BUTTON3);
        assert_eq!(press.click_count, 1);

        let release = translator.mouse_release(5, 6, HostButton(1));
        assert_eq!(release.button, EngineButton(2));
        assert_eq!(release.modifiers, ButtonMask::empty());
    }

    #[test]
    fn ctrl_wheel_zooms_by_sign() {
        let translator = InputTranslator::default();
        assert_eq!(
            translator.mouse_wheel(0, 0, 0.2, Modifiers::CONTROL | Modifiers::SHIFT),
            Dispatch::Action(BrowserAction::ZoomIn)
        );
        assert_eq!(
            translator.mouse_wheel(0, 0, -4.0, Modifiers::CONTROL),
            Dispatch::Action(BrowserAction::ZoomOut)
        );
        assert_eq!(translator.mouse_wheel(0, 0, 0.0, Modifiers::CONTROL), Dispatch::Swallow);
    }

    #[test]
    fn wheel_is_quantized_and_scaled() {
        let translator = InputTranslator::new(ShortcutMap::default(), WheelPolicy::quantized(3.0), true);
        let event = translator.mouse_wheel(3, 4, 0.3, Modifiers::empty()).forwarded().unwrap();
        assert_eq!(event.amount, 3.0);
        assert_eq!((event.x, event.y), (3, 4));
        let event = translator.mouse_wheel(3, 4, -0.3, Modifiers::empty()).forwarded().unwrap();
        assert_eq!(event.amount, -3.0);
    }
}
