use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static descriptive facts about the local host.
///
/// Reported to the coordination server on registration and whenever a
/// field changes. Equality is structural; the change-suppression logic in
/// the session relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hostinfo {
    /// Host name, empty if it could not be determined
    #[serde(default)]
    pub hostname: String,

    /// Operating system, e.g. "linux" or "macos"
    #[serde(default)]
    pub os: String,

    /// Operating system version or distribution string, empty if unknown
    #[serde(default)]
    pub os_version: String,

    /// CPU architecture, e.g. "x86_64"
    #[serde(default)]
    pub arch: String,

    /// Version of this client
    #[serde(default)]
    pub client_version: String,

    /// Most recent link characteristics, if measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netinfo: Option<NetInfo>,
}

/// Measured characteristics of the host's network path.
///
/// Tri-state booleans: `None` not yet probed, `Some(true)`/`Some(false)`
/// a definite result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetInfo {
    /// Whether IPv6 connectivity works
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_ipv6: Option<bool>,

    /// Whether outbound UDP works at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_udp: Option<bool>,

    /// Whether the NAT maps to different public ports per destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_varies_by_dest_port: Option<bool>,

    /// Whether the router supports hairpinning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_pinning: Option<bool>,

    /// Whether UPnP port mapping is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upnp: Option<bool>,

    /// Whether NAT-PMP is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmp: Option<bool>,

    /// Whether PCP is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcp: Option<bool>,

    /// Link type, e.g. "wired", "wifi", "mobile"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,

    /// Relay region with the lowest measured latency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_relay: Option<String>,

    /// Round-trip latency per relay region, in seconds
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relay_latency: BTreeMap<String, f64>,
}
