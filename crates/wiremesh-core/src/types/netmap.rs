use super::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unit of sync from the coordination server.
///
/// Either a full snapshot (`peers` present, authoritative and total) or a
/// delta against the client's previous peer set. When `peers` is present
/// the delta fields are ignored regardless of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapUpdate {
    /// Full authoritative peer list; presence (even empty) makes this a
    /// full snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers: Option<Vec<Node>>,

    /// Nodes added or changed since the previous update; each value
    /// replaces any existing node with the same id entirely
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub peers_changed: Vec<Node>,

    /// Ids of nodes removed since the previous update
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub peers_removed: Vec<NodeId>,

    /// Reachability changes, id to online state
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub online_change: BTreeMap<NodeId, bool>,

    /// Seen-timestamp changes: `true` means "seen now", `false` clears
    /// the timestamp
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_seen_change: BTreeMap<NodeId, bool>,
}

impl MapUpdate {
    /// Returns true if this update carries a full snapshot
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.peers.is_some()
    }

    /// A full-snapshot update carrying the given peers
    #[must_use]
    pub fn full(peers: Vec<Node>) -> Self {
        Self {
            peers: Some(peers),
            ..Self::default()
        }
    }
}
