// Link-layer addresses: colon form (aa:bb:cc:dd:ee:ff) and dotted form (aabb.ccdd.eeff)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MacFormatError;

/// Prefix of a DHCP client identifier for an Ethernet hardware address (option 61, type 1).
pub const CLIENT_ID_PREFIX: &str = "01";

/// A 48-bit link-layer address. Equality is on the value, so comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parses `aa:bb:cc:dd:ee:ff` (also `-` separated).
    pub fn parse_colon(s: &str) -> Result<Self, MacFormatError> {
        let sep = if s.contains('-') { '-' } else { ':' };
        let groups: Vec<&str> = s.split(sep).collect();
        if groups.len() != 6 {
            return Err(MacFormatError::new(s));
        }
        let mut octets = [0u8; 6];
        for (slot, group) in octets.iter_mut().zip(&groups) {
            *slot = parse_hex_group(group, 2).ok_or_else(|| MacFormatError::new(s))? as u8;
        }
        Ok(Self(octets))
    }

    /// Parses `aabb.ccdd.eeff`.
    pub fn parse_dotted(s: &str) -> Result<Self, MacFormatError> {
        let groups: Vec<&str> = s.split('.').collect();
        if groups.len() != 3 {
            return Err(MacFormatError::new(s));
        }
        let mut octets = [0u8; 6];
        for (i, group) in groups.iter().enumerate() {
            let word = parse_hex_group(group, 4).ok_or_else(|| MacFormatError::new(s))?;
            octets[i * 2..i * 2 + 2].copy_from_slice(&word.to_be_bytes());
        }
        Ok(Self(octets))
    }

    /// Lower-case colon form.
    pub fn colon(&self) -> String {
        self.to_string()
    }

    /// Lower-case dotted form.
    pub fn dotted(&self) -> String {
        let o = self.0;
        format!(
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }

    /// Client identifier matching this address in a DHCP reservation: `01` + 12 hex digits.
    pub fn client_id(&self) -> String {
        format!("{}{}", CLIENT_ID_PREFIX, self.dotted().replace('.', ""))
    }
}

fn parse_hex_group(group: &str, width: usize) -> Option<u16> {
    if group.len() != width || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Accepts either textual form.
impl FromStr for MacAddr {
    type Err = MacFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('.') {
            Self::parse_dotted(s)
        } else {
            Self::parse_colon(s)
        }
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Colon form to dotted form.
pub fn to_dotted(colon: &str) -> Result<String, MacFormatError> {
    MacAddr::parse_colon(colon.trim()).map(|m| m.dotted())
}

/// Dotted form to colon form.
pub fn to_colon(dotted: &str) -> Result<String, MacFormatError> {
    MacAddr::parse_dotted(dotted.trim()).map(|m| m.colon())
}
