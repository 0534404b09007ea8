//! Application wiring: document, session, renderer, and client.

use kurbo::Size;
use log::info;
use thiserror::Error;

use scrawlpad_core::crdt::{LoroError, ShapeDocument};
use scrawlpad_core::mapper::{ClientPosition, PointMapper};
use scrawlpad_core::session::{DrawingSession, SessionEffect};
use scrawlpad_core::tools::ToolKind;
use scrawlpad_core::{CollabClient, CollabError, SyncEvent};

use scrawlpad_render::{CanvasRenderer, RendererError};

/// Application errors. All of them are fatal; the single top-level handler
/// in `main` logs and exits.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("collaboration error: {0}")]
    Collab(#[from] CollabError),
    #[error("document error: {0}")]
    Document(#[from] LoroError),
    #[error("renderer error: {0}")]
    Renderer(#[from] RendererError),
    #[error("png encoding error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The drawing application: one client's view of the shared canvas.
pub struct DrawingApp {
    doc: ShapeDocument,
    client: CollabClient,
    session: DrawingSession,
    renderer: CanvasRenderer,
}

impl DrawingApp {
    /// Wire up a session against an already-activated client.
    pub fn new(
        doc: ShapeDocument,
        client: CollabClient,
        mapper: PointMapper,
        width: u32,
        height: u32,
    ) -> Result<Self, AppError> {
        let renderer = CanvasRenderer::new(width, height)?;
        let session = DrawingSession::new(mapper, Size::new(width as f64, height as f64));
        let mut app = Self {
            doc,
            client,
            session,
            renderer,
        };
        // Initial paint from whatever state the document attached with.
        app.repaint();
        Ok(app)
    }

    /// The painted surface, for export.
    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }

    /// The shared document.
    pub fn doc(&self) -> &ShapeDocument {
        &self.doc
    }

    /// The collaboration client.
    pub fn client(&self) -> &CollabClient {
        &self.client
    }

    /// Select the active tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.session.modes.set_tool(tool);
    }

    /// Set the stroke width: the session's erase sizing and the renderer's
    /// ambient line width together.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.session.modes.set_stroke_width(width);
        self.renderer.set_line_width(width);
    }

    pub fn pointer_down(&mut self, raw: ClientPosition) -> Result<(), AppError> {
        let effect = self.session.pointer_down(&self.doc, raw)?;
        self.apply(effect);
        Ok(())
    }

    pub fn pointer_move(&mut self, raw: ClientPosition) -> Result<(), AppError> {
        let effect = self.session.pointer_move(&self.doc, raw)?;
        self.apply(effect);
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        let effect = self.session.pointer_up();
        self.apply(effect);
    }

    /// Empty the shared document and wipe the canvas.
    pub fn clear(&mut self) -> Result<(), AppError> {
        let effect = self.session.clear(&self.doc)?;
        self.apply(effect);
        Ok(())
    }

    /// Feed an incoming server message through the client.
    pub fn handle_server_message(&mut self, json: &str) {
        let Some(event) = self.client.handle_message(&self.doc, json) else {
            return;
        };
        match event {
            SyncEvent::DocumentChanged { from } => {
                info!("document changed by {from}");
                self.repaint();
            }
            SyncEvent::PeersChanged { .. } => {
                info!("peers: {}", self.client.roster_line());
            }
            SyncEvent::JoinedRoom { room, peer_count } => {
                info!("joined {room} ({peer_count} peers), status: {}", self.client.status_line());
            }
            SyncEvent::Error { message } => {
                info!("backend error: {message}, status: {}", self.client.status_line());
            }
        }
    }

    fn repaint(&mut self) {
        self.renderer.repaint(&self.doc.strokes_ordered());
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::None => {}
            SessionEffect::Repaint => self.repaint(),
            SessionEffect::Erase { center, width } => self.renderer.erase_local(center, width),
            SessionEffect::Clear => {
                self.renderer.clear();
                self.repaint();
            }
        }
    }
}
