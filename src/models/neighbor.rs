// Neighbor table rows and resolution outcome

use serde::Serialize;

use crate::mac::MacAddr;

/// One row of `show ipv6 neighbors`; lives only for a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEntry {
    /// Lower-cased IPv6 address as printed by the device.
    pub address: String,
    pub age: u64,
    pub mac: MacAddr,
    /// Entry type (REACH, STALE, ...).
    pub kind: String,
    pub interface: String,
}

/// Outcome of resolving the one neighbor whose MAC is not already known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "result", rename_all = "lowercase")]
pub enum Resolution {
    Resolved(String),
    NotFound,
    /// More than one unlisted neighbor; never guessed.
    Ambiguous(Vec<String>),
}

impl Resolution {
    pub fn address(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(addr) => Some(addr),
            _ => None,
        }
    }
}
