//! Host input to engine input translation.
//!
//! Keyboard, pointer and wheel input arrive in host conventions. The
//! translator either forwards them as engine events, turns a bound chord into
//! a `BrowserAction` the surface performs itself, or swallows the release and
//! typed halves of a chord whose press was intercepted.

pub mod buttons;
pub mod shortcuts;
pub mod translator;
pub mod wheel;
pub mod zoom;

pub use buttons::{ButtonState, HOST_TO_ENGINE_BUTTONS, engine_button};
pub use shortcuts::{BrowserAction, KeyChord, Shortcut, ShortcutMap};
pub use translator::{Dispatch, InputTranslator};
pub use wheel::WheelPolicy;
pub use zoom::{DEFAULT_ZOOM_LIMIT, ZoomLevel};
