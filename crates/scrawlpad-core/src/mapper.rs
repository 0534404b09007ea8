//! Pointer coordinate mapping.

use kurbo::{Point, Vec2};

/// A raw pointer position in client-viewport coordinates, as carried by a
/// pointer or mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPosition {
    pub x: f64,
    pub y: f64,
}

impl ClientPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps raw pointer coordinates into drawing-surface-local pixel space.
///
/// The mapping subtracts the panel's offset from the document origin and
/// adds the current scroll offset, so the result is relative to the panel's
/// top-left corner at zero scroll. No bounds checking happens here; boundary
/// validation is the caller's responsibility.
#[derive(Debug, Clone, Copy)]
pub struct PointMapper {
    panel_offset: Vec2,
    scroll_offset: Vec2,
}

impl PointMapper {
    /// Create a mapper for a panel at the given offset from the document
    /// origin, with zero initial scroll.
    pub fn new(panel_offset: Vec2) -> Self {
        Self {
            panel_offset,
            scroll_offset: Vec2::ZERO,
        }
    }

    /// Update the scroll offset applied to subsequent mappings.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll_offset = scroll;
    }

    /// Map a client-viewport position to a surface-local point.
    pub fn map(&self, raw: ClientPosition) -> Point {
        Point::new(
            raw.x - self.panel_offset.x + self.scroll_offset.x,
            raw.y - self.panel_offset.y + self.scroll_offset.y,
        )
    }
}
