// Address inventory from SNMP table walks

use std::collections::BTreeSet;

use crate::models::AddressBook;
use crate::transport::VarBind;

const V6_INDEX_BYTES: usize = 16;

/// IPv6 address encoded in the trailing 16 components of a table index,
/// as 8 zero-padded hextets. `None` when fewer than 16 components are present or one is not a byte.
pub fn v6_from_index(index: &str) -> Option<String> {
    let parts: Vec<&str> = index.split('.').filter(|p| !p.is_empty()).collect();
    if parts.len() < V6_INDEX_BYTES {
        return None;
    }
    let bytes = parts[parts.len() - V6_INDEX_BYTES..]
        .iter()
        .map(|p| p.parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    let hextets: Vec<String> = bytes
        .chunks_exact(2)
        .map(|pair| format!("{:04x}", u16::from_be_bytes([pair[0], pair[1]])))
        .collect();
    Some(hextets.join(":"))
}

/// Sorted, deduplicated IPv6 addresses; malformed rows are skipped.
pub fn reconstruct_v6(rows: &[VarBind]) -> Vec<String> {
    let mut out = BTreeSet::new();
    for row in rows {
        match v6_from_index(&row.index) {
            Some(addr) => {
                out.insert(addr);
            }
            None => tracing::debug!(oid = %row.oid, "skipping malformed IPv6 address row"),
        }
    }
    out.into_iter().collect()
}

/// Sorted, deduplicated IPv4 addresses taken verbatim from the row values.
pub fn collect_v4(rows: &[VarBind]) -> Vec<String> {
    rows.iter()
        .map(|row| row.value.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn address_book(v4_rows: &[VarBind], v6_rows: &[VarBind]) -> AddressBook {
    AddressBook {
        v4: collect_v4(v4_rows),
        v6: reconstruct_v6(v6_rows),
    }
}
