use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// One candidate address a peer may be reached at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Address and port of the candidate
    pub addr: SocketAddr,
}

impl Endpoint {
    /// Endpoint for the given address
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.addr)
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

/// A discovery round's candidate endpoints, in preference order.
///
/// Comparison is by value and by order; reordering counts as a change.
pub type EndpointSet = Vec<Endpoint>;
