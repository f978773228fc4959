// Device inventory: JSON file of SSH connection parameters per router

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Connection parameters for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceParams {
    pub device_type: String,
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    pub routers: BTreeMap<String, DeviceParams>,
}

impl Inventory {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        anyhow::ensure!(
            path.is_file(),
            "cannot locate inventory file {}",
            path.display()
        );
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading inventory {}", path.display()))?;
        let inventory = Self::load_from_str(&s)?;
        tracing::info!(
            path = %path.display(),
            devices = inventory.routers.len(),
            "Loaded and validated the inventory"
        );
        Ok(inventory)
    }

    /// Parse and validate an inventory document.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(s).context("unable to parse the inventory JSON")?;
        validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn get(&self, name: &str) -> Option<&DeviceParams> {
        self.routers.get(name)
    }
}

const MANDATORY_FIELDS: [&str; 4] = ["device_type", "host", "username", "password"];

// Runs on the raw document so each problem gets a field-level message.
fn validate(value: &serde_json::Value) -> anyhow::Result<()> {
    let root = value
        .as_object()
        .context("inventory must be a JSON object")?;
    let routers = root
        .get("routers")
        .and_then(|r| r.as_object())
        .filter(|r| !r.is_empty())
        .context("inventory must contain a non-empty 'routers' object")?;

    for (name, entry) in routers {
        anyhow::ensure!(!name.trim().is_empty(), "router names must be non-empty");
        let entry = entry
            .as_object()
            .with_context(|| format!("router {} entry must be an object", name))?;
        for field in MANDATORY_FIELDS {
            let v = entry
                .get(field)
                .with_context(|| format!("router {} is missing the {} field", name, field))?;
            anyhow::ensure!(
                v.as_str().is_some_and(|s| !s.is_empty()),
                "router {}'s field {} must be a non-empty string",
                name,
                field
            );
        }
    }
    Ok(())
}
