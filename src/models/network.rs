// Interface state and address inventory models

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operational state of an interface (IF-MIB ifOperStatus).
/// Serializes to `"up"`, `"down"` or `"other: <code>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceState {
    Up,
    Down,
    /// Any other code, kept verbatim for diagnosis.
    Other(String),
}

impl InterfaceState {
    /// Parse from the raw ifOperStatus value: numeric ("1", "2") or the IF-MIB label ("up", "down").
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" | "up" => InterfaceState::Up,
            "2" | "down" => InterfaceState::Down,
            other => InterfaceState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceState::Up => f.write_str("up"),
            InterfaceState::Down => f.write_str("down"),
            InterfaceState::Other(code) => write!(f, "other: {}", code),
        }
    }
}

impl Serialize for InterfaceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InterfaceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "up" => InterfaceState::Up,
            "down" => InterfaceState::Down,
            other => InterfaceState::Other(
                other
                    .strip_prefix("other: ")
                    .unwrap_or(other)
                    .to_string(),
            ),
        })
    }
}

/// Interface name to state.
pub type InterfaceStatus = BTreeMap<String, InterfaceState>;

/// Addresses of one device by family; each list deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    pub v4: Vec<String>,
    pub v6: Vec<String>,
}
