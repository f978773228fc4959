// Per-device telemetry report

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AddressBook, InterfaceStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReport {
    pub addresses: AddressBook,
    #[serde(rename = "interface-status")]
    pub interface_status: InterfaceStatus,
}

/// Device name to report, ordered by name.
pub type Report = BTreeMap<String, DeviceReport>;
