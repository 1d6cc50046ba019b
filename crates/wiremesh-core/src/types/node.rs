use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};

/// Identifier of a node within one server epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One mesh participant (a peer, or self)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, unique within a server epoch
    pub id: NodeId,

    /// Display name assigned by the coordination server
    #[serde(default)]
    pub name: String,

    /// Node public key, as the server encodes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Mesh addresses assigned to the node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<IpAddr>,

    /// Endpoint candidates the node advertised
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<SocketAddr>,

    /// Home relay region, if the node has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay: Option<String>,

    /// Reachability: `None` unknown, `Some(true)` reachable,
    /// `Some(false)` unreachable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,

    /// When the server last saw the node; absent means never, or cleared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,

    /// Descriptive fields the server sends that this client does not
    /// interpret; carried through reconciliation unmodified
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Create a node with the given id and name, all else default
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The client's view of the mesh: nodes sorted ascending by id, no
/// duplicate ids.
///
/// Replaced wholesale on each reconciliation; never mutated in place by
/// consumers.
pub type PeerSet = Vec<Node>;
