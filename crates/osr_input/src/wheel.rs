//! Wheel delta policy.

/// Scroll multiplier applied after quantizing. Roughly matches a desktop
/// browser with smooth scrolling disabled.
pub const DEFAULT_WHEEL_MULTIPLIER: f64 = 3.0;

/// How host wheel deltas become engine scroll units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPolicy {
    /// Round fractional deltas away from zero and scale them. Off where the
    /// platform's native deltas already feel right (trackpads on macOS).
    pub quantize: bool,
    pub multiplier: f64,
}

impl Default for WheelPolicy {
    fn default() -> Self {
        Self::for_platform()
    }
}

impl WheelPolicy {
    /// Default policy for the target platform.
    pub const fn for_platform() -> Self {
        Self {
            quantize: !cfg!(target_os = "macos"),
            multiplier: DEFAULT_WHEEL_MULTIPLIER,
        }
    }

    /// Always quantize with the given multiplier.
    pub const fn quantized(multiplier: f64) -> Self {
        Self {
            quantize: true,
            multiplier,
        }
    }

    /// Forward raw deltas.
    pub const fn raw() -> Self {
        Self {
            quantize: false,
            multiplier: 1.0,
        }
    }

    /// Amount forwarded to the engine for a host delta.
    pub fn scroll_amount(&self, delta: f64) -> f64 {
        if !self.quantize {
            return delta;
        }
        let notches = if delta < 0.0 { delta.floor() } else { delta.ceil() };
        notches * self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_deltas_round_away_from_zero() {
        let policy = WheelPolicy::quantized(3.0);
        assert_eq!(policy.scroll_amount(0.3), 3.0);
        assert_eq!(policy.scroll_amount(-0.3), -3.0);
        assert_eq!(policy.scroll_amount(1.0), 3.0);
        assert_eq!(policy.scroll_amount(-2.5), -9.0);
        assert_eq!(policy.scroll_amount(0.0), 0.0);
    }

    #[test]
    fn raw_policy_passes_through() {
        assert_eq!(WheelPolicy::raw().scroll_amount(0.3), 0.3);
    }
}
