//! Every bound chord, pressed and released, with browser controls on and off.

use osr_core::keys::{KEY_0, KEY_EQUAL, KEY_LEFT, KEY_MINUS, KEY_R, KEY_RIGHT};
use osr_core::{KeyEventKind, Modifiers, Navigability};
use osr_input::{Dispatch, InputTranslator, ShortcutMap, WheelPolicy};

const BOUND_KEYS: [i32; 6] = [KEY_R, KEY_EQUAL, KEY_MINUS, KEY_0, KEY_LEFT, KEY_RIGHT];

/// Character typed alongside a key press, if the key produces one.
fn typed_char(key: i32) -> Option<char> {
    u32::try_from(key)
        .ok()
        .filter(|code| *code < 256)
        .and_then(char::from_u32)
        .map(|character| character.to_ascii_lowercase())
}

fn bound(key: i32, modifiers: Modifiers) -> bool {
    ShortcutMap::default()
        .iter()
        .any(|shortcut| shortcut.chord.key == key && shortcut.chord.modifiers == modifiers)
}

#[test]
fn chords_are_swallowed_when_enabled() {
    let translator = InputTranslator::new(ShortcutMap::default(), WheelPolicy::raw(), true);
    for modifiers in [Modifiers::CONTROL, Modifiers::ALT] {
        for key in BOUND_KEYS {
            let press = translator.key_press(key, 1, modifiers, Navigability::BOTH);
            let release = translator.key_release(key, 1, modifiers, Navigability::BOTH);
            let typed = typed_char(key).map(|character| translator.key_typed(character, modifiers, Navigability::BOTH));
            if bound(key, modifiers) {
                assert!(matches!(press, Dispatch::Action(_)), "press {key} {modifiers:?}");
                assert_eq!(release, Dispatch::Swallow, "release {key} {modifiers:?}");
                if let Some(typed) = typed {
                    assert_eq!(typed, Dispatch::Swallow, "typed {key} {modifiers:?}");
                }
            } else {
                assert!(matches!(press, Dispatch::Forward(_)), "press {key} {modifiers:?}");
                assert!(matches!(release, Dispatch::Forward(_)), "release {key} {modifiers:?}");
                if let Some(typed) = typed {
                    assert!(matches!(typed, Dispatch::Forward(_)), "typed {key} {modifiers:?}");
                }
            }
        }
    }
}

#[test]
fn chords_are_forwarded_verbatim_when_disabled() {
    let translator = InputTranslator::new(ShortcutMap::default(), WheelPolicy::raw(), false);
    for modifiers in [Modifiers::CONTROL, Modifiers::ALT] {
        for key in BOUND_KEYS {
            let press = translator
                .key_press(key, 7, modifiers, Navigability::BOTH)
                .forwarded()
                .unwrap();
            assert_eq!(press.kind, KeyEventKind::Pressed);
            assert_eq!((press.key_code, press.modifiers, press.scan_code), (key, modifiers, Some(7)));

            let release = translator
                .key_release(key, 7, modifiers, Navigability::BOTH)
                .forwarded()
                .unwrap();
            assert_eq!(release.kind, KeyEventKind::Released);
            assert_eq!((release.key_code, release.modifiers), (key, modifiers));

            if let Some(character) = typed_char(key) {
                let typed = translator
                    .key_typed(character, modifiers, Navigability::BOTH)
                    .forwarded()
                    .unwrap();
                assert_eq!(typed.kind, KeyEventKind::Typed);
                assert_eq!((typed.key_char, typed.modifiers), (character, modifiers));
            }
        }
    }
}

#[test]
fn history_chords_pass_through_without_history() {
    let translator = InputTranslator::default();
    let nav = Navigability::default();
    for key in [KEY_LEFT, KEY_RIGHT] {
        assert!(matches!(translator.key_press(key, 0, Modifiers::ALT, nav), Dispatch::Forward(_)));
        assert!(matches!(translator.key_release(key, 0, Modifiers::ALT, nav), Dispatch::Forward(_)));
    }
}

#[test]
fn typed_characters_match_only_their_chord_modifiers() {
    let translator = InputTranslator::default();
    for character in ['r', '=', '-', '0'] {
        assert!(
            matches!(
                translator.key_typed(character, Modifiers::ALT, Navigability::BOTH),
                Dispatch::Forward(_)
            ),
            "alt {character}"
        );
        assert_eq!(
            translator.key_typed(character, Modifiers::CONTROL, Navigability::BOTH),
            Dispatch::Swallow,
            "ctrl {character}"
        );
    }
}
