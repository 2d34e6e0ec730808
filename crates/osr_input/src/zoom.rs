//! Clamped zoom level driven by browser shortcuts.

use crate::shortcuts::BrowserAction;

/// Zoom steps allowed either side of 100%.
pub const DEFAULT_ZOOM_LIMIT: i32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel {
    level: i32,
    limit: i32,
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_LIMIT)
    }
}

impl ZoomLevel {
    /// Level 0 bounded to `[-limit, limit]`.
    pub fn new(limit: i32) -> Self {
        Self {
            level: 0,
            limit: limit.max(0),
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// Set the level directly, clamped to the limit.
    pub fn set(&mut self, level: i32) {
        self.level = level.clamp(-self.limit, self.limit);
    }

    /// Apply a zoom action. Returns the new level when it changed; non-zoom
    /// actions and steps against a bound return `None`.
    pub fn apply(&mut self, action: BrowserAction) -> Option<i32> {
        let target = match action {
            BrowserAction::ZoomIn => self.level.saturating_add(1),
            BrowserAction::ZoomOut => self.level.saturating_sub(1),
            BrowserAction::ResetZoom => 0,
            BrowserAction::Reload | BrowserAction::GoBack | BrowserAction::GoForward => return None,
        };
        let previous = self.level;
        self.set(target);
        (self.level != previous).then_some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_stops_at_limit() {
        let mut zoom = ZoomLevel::default();
        zoom.set(9);
        assert_eq!(zoom.apply(BrowserAction::ZoomIn), None);
        assert_eq!(zoom.apply(BrowserAction::ZoomIn), None);
        assert_eq!(zoom.level(), 9);
    }

    #[test]
    fn zoom_out_stops_at_negative_limit() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..20 {
            zoom.apply(BrowserAction::ZoomOut);
        }
        assert_eq!(zoom.level(), -9);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut zoom = ZoomLevel::new(3);
        zoom.apply(BrowserAction::ZoomIn);
        assert_eq!(zoom.apply(BrowserAction::ResetZoom), Some(0));
        assert_eq!(zoom.apply(BrowserAction::ResetZoom), None);
    }

    #[test]
    fn non_zoom_actions_leave_level() {
        let mut zoom = ZoomLevel::default();
        assert_eq!(zoom.apply(BrowserAction::Reload), None);
        assert_eq!(zoom.level(), 0);
    }
}
