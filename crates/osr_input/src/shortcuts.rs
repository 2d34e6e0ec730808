//! Host-level browser shortcuts.
//!
//! A chord matches only when the modifiers are exactly the bound ones, so
//! Ctrl+Shift+R still reaches the page.

use osr_core::keys::{KEY_0, KEY_EQUAL, KEY_LEFT, KEY_MINUS, KEY_R, KEY_RIGHT};
use osr_core::{KeyCode, Modifiers, Navigability};

/// Something the surface does itself instead of forwarding input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserAction {
    Reload,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    GoBack,
    GoForward,
}

impl BrowserAction {
    /// Whether the action can run given the engine's history state. History
    /// chords that cannot run are forwarded like any other key.
    pub fn is_available(self, navigability: Navigability) -> bool {
        match self {
            Self::GoBack => navigability.can_go_back,
            Self::GoForward => navigability.can_go_forward,
            Self::Reload | Self::ZoomIn | Self::ZoomOut | Self::ResetZoom => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub const fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self::new(key, Modifiers::CONTROL)
    }

    pub const fn alt(key: KeyCode) -> Self {
        Self::new(key, Modifiers::ALT)
    }

    fn matches(&self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub chord: KeyChord,
    pub action: BrowserAction,
}

const BROWSER_SHORTCUTS: [Shortcut; 6] = [
    Shortcut { chord: KeyChord::ctrl(KEY_R), action: BrowserAction::Reload },
    Shortcut { chord: KeyChord::ctrl(KEY_EQUAL), action: BrowserAction::ZoomIn },
    Shortcut { chord: KeyChord::ctrl(KEY_MINUS), action: BrowserAction::ZoomOut },
    Shortcut { chord: KeyChord::ctrl(KEY_0), action: BrowserAction::ResetZoom },
    Shortcut { chord: KeyChord::alt(KEY_LEFT), action: BrowserAction::GoBack },
    Shortcut { chord: KeyChord::alt(KEY_RIGHT), action: BrowserAction::GoForward },
];

/// The set of chords the surface intercepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMap {
    shortcuts: Vec<Shortcut>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::browser_defaults()
    }
}

impl ShortcutMap {
    /// Reload, zoom in/out/reset on Ctrl and history on Alt+arrows.
    pub fn browser_defaults() -> Self {
        Self {
            shortcuts: BROWSER_SHORTCUTS.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }

    /// Bind `chord` to `action`, replacing any existing binding of the chord.
    pub fn bind(&mut self, chord: KeyChord, action: BrowserAction) {
        self.unbind(chord);
        self.shortcuts.push(Shortcut { chord, action });
    }

    pub fn unbind(&mut self, chord: KeyChord) {
        self.shortcuts.retain(|shortcut| shortcut.chord != chord);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.shortcuts.iter()
    }

    /// The action bound to this key and modifier set, if it can run now.
    pub fn lookup(&self, key: KeyCode, modifiers: Modifiers, navigability: Navigability) -> Option<BrowserAction> {
        self.shortcuts
            .iter()
            .find(|shortcut| shortcut.chord.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
            .filter(|action| action.is_available(navigability))
    }
}
