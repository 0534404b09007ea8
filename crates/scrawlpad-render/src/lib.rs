//! Scrawlpad software renderer.
//!
//! Paints the shared stroke document into an owned RGBA pixel surface: a
//! full repaint from document state, plus the localized erase-square
//! clearing the eraser tool needs.

mod raster;
mod renderer;
mod surface;

pub use renderer::{CanvasRenderer, RendererError};
pub use surface::Surface;
