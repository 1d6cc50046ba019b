//! Machine identity key material.

use crate::Result;
use std::fmt;

/// Length of a machine private key in bytes
pub const MACHINE_KEY_LEN: usize = 32;

/// The session's machine private key.
///
/// Opaque to this crate; key agreement and encryption happen in the data
/// plane. `Debug` never prints the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct MachineKey([u8; MACHINE_KEY_LEN]);

impl MachineKey {
    /// Wrap raw key bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; MACHINE_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw key bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MACHINE_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for MachineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MachineKey(..)")
    }
}

/// Capability for retrieving the machine private key.
///
/// Supplied by the caller at session construction; the session invokes it
/// once up front (retrieval failure is fatal to session start) and again
/// whenever the current key is needed.
pub type KeyFetcher = Box<dyn Fn() -> Result<MachineKey> + Send + Sync>;
