//! Bridge settings, from the environment or built in code.

use std::env;

use osr_input::{DEFAULT_ZOOM_LIMIT, InputTranslator, ShortcutMap, WheelPolicy, ZoomLevel};

#[derive(Clone, Debug, PartialEq)]
pub struct BridgeConfig {
    /// Intercept reload, zoom and history chords.
    pub browser_controls: bool,
    /// Blend frames over the host's scene.
    pub transparent: bool,
    /// Zoom steps allowed either side of 100%.
    pub zoom_limit: i32,
    pub wheel: WheelPolicy,
    /// Initial view size.
    pub width: u32,
    pub height: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            browser_controls: true,
            transparent: false,
            zoom_limit: DEFAULT_ZOOM_LIMIT,
            wheel: WheelPolicy::for_platform(),
            width: 1024,
            height: 768,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// - `OSR_BROWSER_CONTROLS`: "0" disables browser shortcuts (default: enabled)
    /// - `OSR_TRANSPARENT`: "1" enables blending (default: disabled)
    /// - `OSR_ZOOM_LIMIT`: zoom steps either side of 100% (default: 9)
    /// - `OSR_WHEEL_MULTIPLIER`: scroll units per wheel notch (default: 3)
    /// - `OSR_WHEEL_QUANTIZE`: "0" or "1" (default: on except macOS)
    /// - `OSR_WIDTH`, `OSR_HEIGHT`: initial view size (default: 1024x768)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    #[must_use]
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let browser_controls = lookup("OSR_BROWSER_CONTROLS").as_deref() != Some("0");
        let transparent = lookup("OSR_TRANSPARENT").as_deref() == Some("1");
        let zoom_limit = lookup("OSR_ZOOM_LIMIT")
            .and_then(|val| val.parse::<i32>().ok())
            .unwrap_or(defaults.zoom_limit)
            .max(0);
        let multiplier = lookup("OSR_WHEEL_MULTIPLIER")
            .and_then(|val| val.parse::<f64>().ok())
            .filter(|val| val.is_finite())
            .unwrap_or(defaults.wheel.multiplier);
        let quantize = match lookup("OSR_WHEEL_QUANTIZE").as_deref() {
            Some("0") => false,
            Some("1") => true,
            _ => defaults.wheel.quantize,
        };
        let width = lookup("OSR_WIDTH")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.width);
        let height = lookup("OSR_HEIGHT")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.height);
        Self {
            browser_controls,
            transparent,
            zoom_limit,
            wheel: WheelPolicy { quantize, multiplier },
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_browser_controls(mut self, enabled: bool) -> Self {
        self.browser_controls = enabled;
        self
    }

    #[must_use]
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    #[must_use]
    pub fn with_zoom_limit(mut self, limit: i32) -> Self {
        self.zoom_limit = limit.max(0);
        self
    }

    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelPolicy) -> Self {
        self.wheel = wheel;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// A fresh translator with the default shortcut table.
    pub fn translator(&self) -> InputTranslator {
        InputTranslator::new(ShortcutMap::browser_defaults(), self.wheel, self.browser_controls)
    }

    pub fn zoom(&self) -> ZoomLevel {
        ZoomLevel::new(self.zoom_limit)
    }
}
