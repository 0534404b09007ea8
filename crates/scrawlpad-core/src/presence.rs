//! Peer presence: per-client metadata and the roster display.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-client metadata shared through the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerMetadata {
    pub username: String,
}

impl PeerMetadata {
    /// Metadata with a freshly generated username.
    pub fn generated() -> Self {
        Self {
            username: generate_username(),
        }
    }
}

/// Generate a short random-looking username.
/// Uses a counter + hash approach that needs no platform entropy source.
pub fn generate_username() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // Mix the counter for better distribution (splitmix32-like)
    let mut x = counter.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;

    format!("user-{x:08x}")
}

/// The set of peers currently in the room, keyed by peer id.
#[derive(Debug, Clone, Default)]
pub struct PeerRoster {
    peers: BTreeMap<String, PeerMetadata>,
}

impl PeerRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster with the backend's current view.
    pub fn replace(&mut self, peers: BTreeMap<String, PeerMetadata>) {
        self.peers = peers;
    }

    /// Number of peers in the room.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// All usernames in peer-id order.
    pub fn usernames(&self) -> Vec<&str> {
        self.peers.values().map(|m| m.username.as_str()).collect()
    }

    /// Render the peer list for display, marking the current user's name.
    pub fn display(&self, own_username: &str) -> String {
        let parts: Vec<String> = self
            .peers
            .values()
            .map(|m| {
                if m.username == own_username {
                    format!("{} (you)", m.username)
                } else {
                    m.username.clone()
                }
            })
            .collect();
        parts.join(", ")
    }
}
