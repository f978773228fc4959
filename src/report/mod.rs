// Report document: per-device addresses and interface status

pub mod graph;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::OutputConfig;
use crate::models::{AddressBook, DeviceReport, InterfaceStatus, Report};
use crate::telemetry::PollSnapshot;

pub use graph::render_graph;

/// One entry per device named in either map; a device missing from one side gets empty data there.
pub fn render_report(
    addresses: &BTreeMap<String, AddressBook>,
    status: &BTreeMap<String, InterfaceStatus>,
) -> Report {
    addresses
        .keys()
        .chain(status.keys())
        .map(|name| {
            (
                name.clone(),
                DeviceReport {
                    addresses: addresses.get(name).cloned().unwrap_or_default(),
                    interface_status: status.get(name).cloned().unwrap_or_default(),
                },
            )
        })
        .collect()
}

/// Writes the report as pretty JSON, creating parent directories as needed.
pub fn write_report(report: &Report, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    create_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    tracing::info!(path = %path.display(), devices = report.len(), "Report written");
    Ok(())
}

/// Writes the report and the CPU graph of a poll cycle; returns the written paths.
pub fn write_artifacts(snapshot: &PollSnapshot, output: &OutputConfig) -> anyhow::Result<Vec<PathBuf>> {
    let report_path = PathBuf::from(&output.report_path);
    let graph_path = PathBuf::from(&output.graph_path);
    write_report(&snapshot.report, &report_path)?;
    let title = format!("{} CPU Utilization", snapshot.cpu_device);
    render_graph(&snapshot.cpu, &title, &graph_path)?;
    Ok(vec![report_path, graph_path])
}

pub(crate) fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}
