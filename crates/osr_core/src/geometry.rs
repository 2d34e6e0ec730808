//! Integer geometry shared by frames, dirty regions and pointer input.

/// A pixel rectangle inside a frame buffer. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from origin and extent.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` frame.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// True when the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Clip this rectangle to a `width` x `height` frame.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the frame.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Self> {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Self::new(self.x, self.y, right - self.x, bottom - self.y))
    }

    /// Whether the pixel at (`x`, `y`) lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A pointer position in surface-local pixels. Can be negative while the
/// pointer is dragged outside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_inside_is_identity() {
        let rect = Rect::new(2, 3, 4, 5);
        assert_eq!(rect.clip_to(100, 100), Some(rect));
    }

    #[test]
    fn clip_trims_overhang() {
        let rect = Rect::new(8, 8, 10, 10);
        assert_eq!(rect.clip_to(12, 10), Some(Rect::new(8, 8, 4, 2)));
    }

    #[test]
    fn clip_outside_is_none() {
        assert_eq!(Rect::new(20, 0, 4, 4).clip_to(10, 10), None);
        assert_eq!(Rect::new(0, 0, 0, 4).clip_to(10, 10), None);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(1, 1, 2, 2);
        assert!(rect.contains(1, 1));
        assert!(rect.contains(2, 2));
        assert!(!rect.contains(3, 1));
        assert!(!rect.contains(0, 1));
    }
}
