// IPv6 neighbor table parsing and unknown-neighbor resolution

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::mac::MacAddr;
use crate::models::{NeighborEntry, Resolution};

/// `show ipv6 neighbors` row: address, age, dotted MAC, state, interface.
static NEIGHBOR_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*([0-9a-f]*:[0-9a-f:]*)[ \t]+(\d+)[ \t]+([0-9a-f]{4}\.[0-9a-f]{4}\.[0-9a-f]{4})[ \t]+(\S+)[ \t]+(\S+)[ \t\r]*$",
    )
    .expect("neighbor row pattern")
});

/// Every row of the table that matches the row grammar, in output order.
pub fn parse_neighbors(text: &str) -> Vec<NeighborEntry> {
    NEIGHBOR_ROW_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(NeighborEntry {
                address: caps[1].to_lowercase(),
                age: caps[2].parse().ok()?,
                mac: MacAddr::parse_dotted(&caps[3]).ok()?,
                kind: caps[4].to_string(),
                interface: caps[5].to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct NeighborResolver {
    interface: String,
    address_prefix: String,
}

impl NeighborResolver {
    /// Rows on `interface` whose address starts with `address_prefix` are eligible.
    /// An empty prefix makes every address eligible.
    pub fn new(interface: impl Into<String>, address_prefix: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            address_prefix: address_prefix.into().to_lowercase(),
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    fn is_eligible(&self, entry: &NeighborEntry) -> bool {
        entry.interface.eq_ignore_ascii_case(&self.interface)
            && entry.address.starts_with(&self.address_prefix)
    }

    /// Addresses of eligible rows whose MAC is not in `known`, deduplicated in output order.
    pub fn candidates(&self, text: &str, known: &HashSet<MacAddr>) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for entry in parse_neighbors(text) {
            if !self.is_eligible(&entry) || known.contains(&entry.mac) {
                continue;
            }
            if !candidates.contains(&entry.address) {
                candidates.push(entry.address);
            }
        }
        candidates
    }

    /// Resolves only when exactly one unlisted neighbor remains.
    pub fn resolve_unknown(&self, text: &str, known: &HashSet<MacAddr>) -> Resolution {
        let mut candidates = self.candidates(text, known);
        match candidates.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Resolved(candidates.remove(0)),
            n => {
                tracing::warn!(
                    interface = %self.interface,
                    candidates = n,
                    "More than one unlisted neighbor; refusing to guess"
                );
                Resolution::Ambiguous(candidates)
            }
        }
    }
}
