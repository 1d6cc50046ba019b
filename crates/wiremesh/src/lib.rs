//! State-reconciliation core of a mesh-VPN control-plane client.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wiremesh::{ControlSession, MachineKey, Options, Reconciler};
//!
//! fn main() -> wiremesh::Result<()> {
//!     let session = ControlSession::new(Options {
//!         server_url: "https://ctrl.example.com".into(),
//!         hostinfo: wiremesh::hostinfo::collect(),
//!         key_fetcher: Box::new(load_machine_key),
//!     })?;
//!
//!     let reconciler = Reconciler::new();
//!     let mut peers = Vec::new();
//!     loop {
//!         let update = fetch_map_update()?; // transport, not this crate
//!         peers = reconciler.reconcile(&update, &peers);
//!     }
//! }
//! ```
//!
//! The transport that polls the server, the uploader that reports local
//! state, and the data plane that talks to peers are collaborators; this
//! crate owns only the merge semantics and change suppression between
//! them.

#![doc(html_root_url = "https://docs.rs/wiremesh/0.1.0")]

// Re-export core types
pub use wiremesh_core::*;

// Re-export the control session core
pub use wiremesh_control::{hostinfo, ControlSession, LocalStateSnapshot, Options, Reconciler};

// Re-export serialization for convenience
pub use serde;
pub use serde_json;
