// SNMP telemetry: address inventory, interface status and CPU sampling per device.
// Devices are polled concurrently; results are keyed by device name so ordering is stable.

pub mod cpu;
pub mod oids;
pub mod status;
pub mod walker;

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::PollingConfig;
use crate::error::TransportError;
use crate::models::{AddressBook, CpuSample, InterfaceStatus, Report};
use crate::report;
use crate::transport::{SnmpConnector, SnmpSession};
use cpu::CpuSampler;

/// Addresses and interface states read from one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePoll {
    pub addresses: AddressBook,
    pub status: InterfaceStatus,
}

pub async fn poll_device(session: &dyn SnmpSession) -> Result<DevicePoll, TransportError> {
    let names = session.walk(oids::IF_DESCR).await?;
    let codes = session.walk(oids::IF_OPER_STATUS).await?;
    let v4 = session.walk(oids::IP_AD_ENT_ADDR).await?;
    let v6 = session.walk(oids::IP_ADDRESS_IF_INDEX_V6).await?;
    Ok(DevicePoll {
        addresses: walker::address_book(&v4, &v6),
        status: status::map_status(&names, &codes),
    })
}

/// Outcome of one full poll cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSnapshot {
    /// Unix milliseconds at the end of the cycle.
    pub timestamp: u64,
    pub report: Report,
    pub cpu_device: String,
    pub cpu: Vec<CpuSample>,
}

pub struct Poller {
    connector: Arc<dyn SnmpConnector>,
    community: String,
    devices: BTreeMap<String, String>,
    cpu_device: String,
    sampler: CpuSampler,
}

impl Poller {
    pub fn new(connector: Arc<dyn SnmpConnector>, config: &PollingConfig) -> Self {
        Self {
            connector,
            community: config.community.clone(),
            devices: config.devices.clone(),
            cpu_device: config.cpu_device.clone(),
            sampler: CpuSampler::from_config(config),
        }
    }

    pub fn cpu_device(&self) -> &str {
        &self.cpu_device
    }

    /// Polls every device concurrently. A device that fails is logged and reported empty.
    /// Cancellation abandons the walks still in flight; those devices are reported empty too.
    pub async fn poll_all(
        &self,
        cancel: &CancellationToken,
    ) -> (
        BTreeMap<String, AddressBook>,
        BTreeMap<String, InterfaceStatus>,
    ) {
        let polls = self.devices.iter().map(|(name, host)| async move {
            let session = self.connector.open(host, &self.community);
            let result = tokio::select! {
                r = poll_device(session.as_ref()) => Some(r),
                _ = cancel.cancelled() => None,
            };
            (name.clone(), host.clone(), result)
        });

        let mut addresses = BTreeMap::new();
        let mut statuses = BTreeMap::new();
        for (name, host, result) in join_all(polls).await {
            let poll = match result {
                Some(Ok(p)) => {
                    tracing::debug!(
                        device = %name,
                        v4 = p.addresses.v4.len(),
                        v6 = p.addresses.v6.len(),
                        interfaces = p.status.len(),
                        "Device polled"
                    );
                    p
                }
                Some(Err(e)) => {
                    tracing::warn!(device = %name, host = %host, error = %e, operation = "poll_device", "Device poll failed");
                    DevicePoll::default()
                }
                None => {
                    tracing::debug!(device = %name, "Device poll cancelled");
                    DevicePoll::default()
                }
            };
            addresses.insert(name.clone(), poll.addresses);
            statuses.insert(name, poll.status);
        }
        (addresses, statuses)
    }

    /// Samples the CPU device for the configured window.
    pub async fn sample_cpu<F>(&self, cancel: &CancellationToken, on_sample: F) -> Vec<CpuSample>
    where
        F: FnMut(&CpuSample),
    {
        let Some(host) = self.devices.get(&self.cpu_device) else {
            tracing::warn!(device = %self.cpu_device, "CPU device has no monitoring address");
            return Vec::new();
        };
        let session = self.connector.open(host, &self.community);
        tracing::info!(
            device = %self.cpu_device,
            duration_secs = self.sampler.duration().as_secs(),
            "Sampling CPU"
        );
        self.sampler
            .sample_with(session.as_ref(), cancel, on_sample)
            .await
    }

    /// Inventory poll of every device followed by the CPU sampling window.
    pub async fn cycle<F>(&self, cancel: &CancellationToken, on_sample: F) -> PollSnapshot
    where
        F: FnMut(&CpuSample),
    {
        let (addresses, statuses) = self.poll_all(cancel).await;
        let report = report::render_report(&addresses, &statuses);
        let cpu = self.sample_cpu(cancel, on_sample).await;
        PollSnapshot {
            timestamp: chrono::Utc::now().timestamp_millis().max(0) as u64,
            report,
            cpu_device: self.cpu_device.clone(),
            cpu,
        }
    }
}
