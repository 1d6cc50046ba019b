//! Core types for the wiremesh control-plane client.
//!
//! This crate provides the foundational types used across the wiremesh
//! library:
//!
//! - **Types**: the peer map data model ([`Node`], [`MapUpdate`],
//!   [`Hostinfo`], [`NetInfo`], [`Endpoint`])
//! - **Clock**: injectable time source for reconciliation
//! - **Keys**: machine identity key material and the fetch capability
//! - **Errors**: error handling with [`WiremeshError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use wiremesh_core::{MapUpdate, Node, Result};
//!
//! fn inspect(update: &MapUpdate) {
//!     if update.is_full() {
//!         println!("full snapshot");
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/wiremesh-core/0.1.0")]

pub mod clock;
mod error;
mod key;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, WiremeshError};
pub use key::{KeyFetcher, MachineKey, MACHINE_KEY_LEN};
pub use types::*;
