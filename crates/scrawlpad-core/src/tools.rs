//! Tool mode and stroke-width selection.

use serde::{Deserialize, Serialize};

/// Line width used until the user adjusts the range control.
pub const INITIAL_STROKE_WIDTH: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
}

/// Tracks the active tool and the current stroke width.
///
/// Purely local state with no document effect. Switching tools is
/// independent of the drawing session; a change takes effect on the next
/// pointer-move evaluation. Width applies to erase-square sizing and to the
/// renderer's ambient line width, never to already-drawn strokes.
#[derive(Debug, Clone)]
pub struct ModeSelector {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current stroke width in pixels.
    stroke_width: f64,
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            stroke_width: INITIAL_STROKE_WIDTH,
        }
    }
}

impl ModeSelector {
    /// Create a selector with the brush active at the initial width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Whether the given tool control should render highlighted.
    pub fn is_selected(&self, tool: ToolKind) -> bool {
        self.current_tool == tool
    }

    /// The current stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Set the stroke width for subsequent strokes and erases.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }
}
