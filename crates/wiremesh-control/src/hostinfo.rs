//! Local host fact collection.

use std::env;
use tracing::warn;
use wiremesh_core::Hostinfo;

/// Collect the host's descriptive facts.
///
/// Always succeeds: a fact that cannot be determined degrades to an empty
/// value rather than failing the whole record, so a session can start on a
/// host with, say, a broken hostname lookup.
#[must_use]
pub fn collect() -> Hostinfo {
    let hostname = match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            warn!(error = %e, "hostname lookup failed");
            String::new()
        }
    };

    Hostinfo {
        hostname,
        os: env::consts::OS.to_string(),
        os_version: os_version(),
        arch: env::consts::ARCH.to_string(),
        client_version: env!("CARGO_PKG_VERSION").to_string(),
        netinfo: None,
    }
}

/// Distribution/version string, empty when unavailable.
#[cfg(target_os = "linux")]
fn os_version() -> String {
    let Ok(contents) = std::fs::read_to_string("/etc/os-release") else {
        return String::new();
    };
    contents
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|v| v.trim_matches('"').to_string())
        .unwrap_or_default()
}

#[cfg(not(target_os = "linux"))]
fn os_version() -> String {
    String::new()
}
