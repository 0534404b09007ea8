//! Scrawlpad Core Library
//!
//! Platform-agnostic state and logic for a shared drawing canvas: pointer
//! mapping, the drawing-session state machine, the CRDT-backed stroke
//! document, and the collaboration client bookkeeping around it.

pub mod collaboration;
pub mod crdt;
pub mod mapper;
pub mod presence;
pub mod session;
pub mod stroke;
pub mod sync;
pub mod tools;

pub use collaboration::{ClientConfig, CollabClient, CollabError};
pub use crdt::ShapeDocument;
pub use mapper::{ClientPosition, PointMapper};
pub use presence::{PeerMetadata, PeerRoster};
pub use session::{DrawingSession, SessionEffect, SessionState};
pub use stroke::{Stroke, StrokeId};
pub use sync::{ConnectionState, SyncEvent};
pub use tools::{ModeSelector, ToolKind, INITIAL_STROKE_WIDTH};
