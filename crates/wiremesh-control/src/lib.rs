//! Control session core for the wiremesh client.
//!
//! This crate provides the state-reconciliation half of the control-plane
//! client: [`Reconciler`] merges server map updates into the client's peer
//! set, and [`ControlSession`] tracks the locally-reported state and
//! suppresses redundant uploads. Transport, polling policy, and
//! persistence live with the callers.

#![doc(html_root_url = "https://docs.rs/wiremesh-control/0.1.0")]

pub mod hostinfo;
mod netmap;
mod session;

pub use netmap::Reconciler;
pub use session::{ControlSession, LocalStateSnapshot, Options};
pub use wiremesh_core::{Result, WiremeshError};
