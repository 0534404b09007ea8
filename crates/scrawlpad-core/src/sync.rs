//! Wire messages and events for the collaboration backend.
//!
//! The transport itself lives outside this crate; these are the JSON
//! payloads a client exchanges with the relay and the events the rest of
//! the application reacts to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::presence::PeerMetadata;

/// Messages sent to the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a document room
    Join { room: String },
    /// Leave current room
    Leave,
    /// Sync CRDT data (base64 encoded Loro bytes)
    Sync { data: String },
    /// Announce this client's metadata
    Presence { metadata: PeerMetadata },
}

/// Messages received from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirm room join with current state
    Joined {
        room: String,
        peer_count: usize,
        /// Initial sync data (if the room has history)
        #[serde(skip_serializing_if = "Option::is_none")]
        initial_sync: Option<String>,
    },
    /// The room's peer roster changed
    PeersChanged {
        peers: BTreeMap<String, PeerMetadata>,
    },
    /// Sync data from another peer
    Sync { from: String, data: String },
    /// Error message
    Error { message: String },
}

/// Connection state, as shown in the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionState {
    /// Text for the network-status element.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Error => "error",
        }
    }
}

/// Events surfaced to the application
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Joined a room
    JoinedRoom { room: String, peer_count: usize },
    /// The peer roster changed
    PeersChanged {
        peers: BTreeMap<String, PeerMetadata>,
    },
    /// The shared document changed; repaint from its strokes
    DocumentChanged { from: String },
    /// Error occurred
    Error { message: String },
}

/// Encode a CRDT payload for transport.
pub fn encode_update(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a transported CRDT payload.
pub fn decode_update(data: &str) -> Option<Vec<u8>> {
    BASE64.decode(data).ok()
}
