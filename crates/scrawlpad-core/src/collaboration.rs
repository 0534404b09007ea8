//! Collaboration client bookkeeping.
//!
//! The backend transport is external; this client owns the local half of
//! the protocol: lifecycle (create, activate, attach, sync), the outgoing
//! message queue a transport drains, the connection status shown to the
//! user, and the peer roster. Incoming server messages are applied to the
//! shared document and surfaced as [`SyncEvent`]s.

use log::{debug, warn};
use thiserror::Error;

use crate::crdt::ShapeDocument;
use crate::presence::{PeerMetadata, PeerRoster};
use crate::sync::{
    decode_update, encode_update, ClientMessage, ConnectionState, ServerMessage, SyncEvent,
};

/// Client creation options.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay address.
    pub address: String,
    /// Metadata announced to other peers.
    pub metadata: PeerMetadata,
    /// Delay between sync loop iterations, in milliseconds.
    pub sync_loop_duration_ms: u64,
    /// Delay before the transport re-opens a dropped stream, in milliseconds.
    pub reconnect_stream_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8080".to_string(),
            metadata: PeerMetadata::generated(),
            sync_loop_duration_ms: 0,
            reconnect_stream_delay_ms: 1000,
        }
    }
}

/// Collaboration client errors. Any of these during startup is fatal to the
/// session; there is no retry or partial-functionality fallback.
#[derive(Debug, Error)]
pub enum CollabError {
    #[error("client is not activated")]
    NotActivated,
    #[error("no document attached")]
    NotAttached,
    #[error("document error: {0}")]
    Document(#[from] loro::LoroError),
}

/// The collaboration client.
pub struct CollabClient {
    config: ClientConfig,
    state: ConnectionState,
    attached_key: Option<String>,
    roster: PeerRoster,
    /// Pending outgoing messages (JSON strings), drained by the transport.
    outgoing: Vec<String>,
}

impl CollabClient {
    /// Create a client from config. The client starts disconnected.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
            attached_key: None,
            roster: PeerRoster::new(),
            outgoing: Vec::new(),
        }
    }

    /// The configured relay address.
    pub fn address(&self) -> &str {
        &self.config.address
    }

    /// This client's announced username.
    pub fn username(&self) -> &str {
        &self.config.metadata.username
    }

    /// Current connection state.
    pub fn status(&self) -> ConnectionState {
        self.state
    }

    /// Text for the network-status display.
    pub fn status_line(&self) -> &'static str {
        self.state.label()
    }

    /// The current peer roster.
    pub fn roster(&self) -> &PeerRoster {
        &self.roster
    }

    /// The peer list display line, with this client's name marked.
    pub fn roster_line(&self) -> String {
        self.roster.display(self.username())
    }

    /// Begin the connection handshake and announce this client's metadata.
    pub fn activate(&mut self) -> Result<(), CollabError> {
        self.state = ConnectionState::Connecting;
        self.queue(ClientMessage::Presence {
            metadata: self.config.metadata.clone(),
        });
        Ok(())
    }

    /// Attach the shared document under the given key, initializing its
    /// root idempotently, and request to join the document's room.
    pub fn attach(&mut self, doc: &ShapeDocument, key: &str) -> Result<(), CollabError> {
        if self.state == ConnectionState::Disconnected {
            return Err(CollabError::NotActivated);
        }

        doc.ensure_initialized("create points if not exists");
        self.attached_key = Some(key.to_string());
        self.queue(ClientMessage::Join {
            room: key.to_string(),
        });
        Ok(())
    }

    /// Queue a full-state sync of the attached document.
    pub fn sync(&mut self, doc: &ShapeDocument) -> Result<(), CollabError> {
        if self.attached_key.is_none() {
            return Err(CollabError::NotAttached);
        }

        let data = encode_update(&doc.export_snapshot());
        self.queue(ClientMessage::Sync { data });
        Ok(())
    }

    /// Request to leave the current room.
    pub fn detach(&mut self) {
        if self.attached_key.take().is_some() {
            self.queue(ClientMessage::Leave);
        }
    }

    /// Take pending outgoing messages (drains the queue).
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    /// Check if there are pending outgoing messages.
    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    fn queue(&mut self, msg: ClientMessage) {
        match serde_json::to_string(&msg) {
            Ok(json) => self.outgoing.push(json),
            Err(err) => warn!("dropping unencodable client message: {err}"),
        }
    }

    /// Handle an incoming server message, applying document payloads to
    /// `doc`. Returns the event the application should react to, or `None`
    /// for unparseable or unusable input.
    pub fn handle_message(&mut self, doc: &ShapeDocument, json: &str) -> Option<SyncEvent> {
        let msg: ServerMessage = serde_json::from_str(json).ok()?;

        match msg {
            ServerMessage::Joined {
                room,
                peer_count,
                initial_sync,
            } => {
                self.state = ConnectionState::Connected;
                if let Some(data) = initial_sync.as_deref().and_then(decode_update) {
                    if let Err(err) = doc.import(&data) {
                        warn!("initial sync import failed: {err}");
                    }
                }
                debug!("joined room {room} with {peer_count} peers");
                Some(SyncEvent::JoinedRoom { room, peer_count })
            }
            ServerMessage::PeersChanged { peers } => {
                self.roster.replace(peers.clone());
                Some(SyncEvent::PeersChanged { peers })
            }
            ServerMessage::Sync { from, data } => {
                let bytes = decode_update(&data)?;
                if doc.import(&bytes).is_ok() {
                    Some(SyncEvent::DocumentChanged { from })
                } else {
                    None
                }
            }
            ServerMessage::Error { message } => {
                self.state = ConnectionState::Error;
                Some(SyncEvent::Error { message })
            }
        }
    }
}
