//! Full-repaint canvas renderer.

use kurbo::{Point, Rect};
use peniko::Color;
use thiserror::Error;

use scrawlpad_core::stroke::Stroke;
use scrawlpad_core::tools::INITIAL_STROKE_WIDTH;

use crate::raster::stroke_polyline;
use crate::surface::Surface;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
}

/// Paints strokes into an owned pixel surface.
///
/// The line width and colors are ambient renderer state read at paint time;
/// strokes carry no style of their own, so a width change affects how every
/// stroke is drawn on the next repaint.
pub struct CanvasRenderer {
    surface: Surface,
    line_width: f64,
    stroke_color: Color,
    background: Color,
}

impl CanvasRenderer {
    /// Create a renderer with a white background, black strokes, and the
    /// initial line width.
    pub fn new(width: u32, height: u32) -> Result<Self, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::InitFailed(format!(
                "zero-sized surface ({width}x{height})"
            )));
        }

        let background = Color::from_rgba8(255, 255, 255, 255);
        Ok(Self {
            surface: Surface::new(width, height, background),
            line_width: INITIAL_STROKE_WIDTH,
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            background,
        })
    }

    /// The painted surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The ambient line width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Set the ambient line width for subsequent repaints and erases.
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Repaint the whole surface from the given strokes, in order.
    ///
    /// Clears everything first, so repainting is idempotent and any local
    /// erase marks vanish. O(total points); no dirty-region tracking.
    // TODO only changed strokes should be redrawn.
    pub fn repaint(&mut self, strokes: &[Stroke]) {
        self.surface.fill(self.background);
        for stroke in strokes {
            stroke_polyline(
                &mut self.surface,
                &stroke.points,
                self.line_width,
                self.stroke_color,
            );
        }
    }

    /// Clear a `width`-sided square centered on `point` back to the
    /// background. Local and transient; the document is not consulted, and
    /// the next repaint repaints over it.
    pub fn erase_local(&mut self, point: Point, width: f64) {
        let half = width / 2.0;
        self.surface.fill_rect(
            Rect::new(point.x - half, point.y - half, point.x + half, point.y + half),
            self.background,
        );
    }

    /// Wipe the whole surface to the background color.
    pub fn clear(&mut self) {
        self.surface.fill(self.background);
    }
}
