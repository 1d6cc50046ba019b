//! Control session state.
//!
//! A [`ControlSession`] owns the client's currently-reported local state
//! (host facts, link facts, endpoint candidates) and decides whether a new
//! observation differs from what the server already knows. The setters
//! return a changed flag; only `true` results need to reach the upload
//! path, which keeps the control channel free of no-op reports.

use std::sync::{Mutex, PoisonError};
use tracing::debug;
use wiremesh_core::{
    Endpoint, EndpointSet, Hostinfo, KeyFetcher, MachineKey, NetInfo, Result, WiremeshError,
};

/// Configuration for starting a control session
pub struct Options {
    /// Coordination server to report to, e.g. `https://ctrl.example.com`
    pub server_url: String,

    /// Host facts to report initially; see [`crate::hostinfo::collect`]
    pub hostinfo: Hostinfo,

    /// Capability for retrieving the machine private key
    pub key_fetcher: KeyFetcher,
}

/// The state a session last accepted for upload
#[derive(Debug, Clone)]
struct LocalState {
    hostinfo: Hostinfo,
    netinfo: Option<NetInfo>,
    endpoints: Option<EndpointState>,
}

#[derive(Debug, Clone)]
struct EndpointState {
    generation: u64,
    endpoints: EndpointSet,
}

/// Copy of the session's current state, taken under the lock.
///
/// The uploader reads one of these and then performs I/O with the lock
/// released.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStateSnapshot {
    /// Current host facts
    pub hostinfo: Hostinfo,
    /// Current link facts, if any were reported
    pub netinfo: Option<NetInfo>,
    /// Discovery round of the current endpoints, if any were reported
    pub endpoint_generation: Option<u64>,
    /// Current endpoint candidates
    pub endpoints: EndpointSet,
}

/// One client's session against the coordination server.
///
/// Holds the immutable session configuration and the mutable local state
/// behind a single mutex. The mutex is held only across the
/// compare-then-replace step of each setter and the copy-out of
/// [`snapshot`](Self::snapshot), never across I/O.
pub struct ControlSession {
    server_url: String,
    key_fetcher: KeyFetcher,
    state: Mutex<LocalState>,
}

impl ControlSession {
    /// Start a session.
    ///
    /// Validates the server URL and retrieves the machine key once up
    /// front; either failing means the session cannot start.
    pub fn new(opts: Options) -> Result<Self> {
        if opts.server_url.is_empty() {
            return Err(WiremeshError::MissingServerUrl);
        }
        url::Url::parse(&opts.server_url).map_err(|e| WiremeshError::InvalidServerUrl {
            url: opts.server_url.clone(),
            reason: e.to_string(),
        })?;

        // No identity, no session.
        (opts.key_fetcher)()?;

        debug!(server_url = %opts.server_url, "control session created");
        Ok(Self {
            server_url: opts.server_url,
            key_fetcher: opts.key_fetcher,
            state: Mutex::new(LocalState {
                hostinfo: opts.hostinfo,
                netinfo: None,
                endpoints: None,
            }),
        })
    }

    /// The coordination server URL, fixed for the session's lifetime
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Retrieve the current machine private key.
    ///
    /// Re-invokes the fetch capability so a rotated key is picked up.
    pub fn machine_key(&self) -> Result<MachineKey> {
        (self.key_fetcher)()
    }

    /// Record new link facts. Returns true if they differ from the stored
    /// value; false means the server already has them and no upload is
    /// needed.
    pub fn set_netinfo(&self, netinfo: &NetInfo) -> bool {
        let mut state = self.lock_state();
        if state.netinfo.as_ref() == Some(netinfo) {
            return false;
        }
        debug!(?netinfo, "netinfo changed");
        state.netinfo = Some(netinfo.clone());
        true
    }

    /// Record new host facts. Same contract as
    /// [`set_netinfo`](Self::set_netinfo): structural comparison, replace
    /// only on difference.
    pub fn set_hostinfo(&self, hostinfo: &Hostinfo) -> bool {
        let mut state = self.lock_state();
        if state.hostinfo == *hostinfo {
            return false;
        }
        debug!(hostname = %hostinfo.hostname, "hostinfo changed");
        state.hostinfo = hostinfo.clone();
        true
    }

    /// Record the endpoint candidates from one discovery round.
    ///
    /// Within a generation, identical candidate lists are suppressed. A
    /// new generation is always accepted and reported, even when the
    /// candidates are value-identical to the previous round's: the server
    /// learns that discovery re-ran, whether or not anything moved.
    pub fn set_endpoints(&self, generation: u64, endpoints: &[Endpoint]) -> bool {
        let mut state = self.lock_state();
        if let Some(prev) = &state.endpoints {
            if prev.generation == generation && prev.endpoints == endpoints {
                return false;
            }
        }
        debug!(generation, count = endpoints.len(), "endpoints changed");
        state.endpoints = Some(EndpointState {
            generation,
            endpoints: endpoints.to_vec(),
        });
        true
    }

    /// Copy out the current state for the uploader
    #[must_use]
    pub fn snapshot(&self) -> LocalStateSnapshot {
        let state = self.lock_state();
        LocalStateSnapshot {
            hostinfo: state.hostinfo.clone(),
            netinfo: state.netinfo.clone(),
            endpoint_generation: state.endpoints.as_ref().map(|e| e.generation),
            endpoints: state
                .endpoints
                .as_ref()
                .map(|e| e.endpoints.clone())
                .unwrap_or_default(),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LocalState> {
        // The record is plain data; a panicking holder cannot leave it
        // half-written, so recover instead of propagating poison.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ControlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlSession")
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}
