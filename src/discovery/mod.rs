//! Discovery run: find the unconfigured router's IPv6 address through a neighbor
//! table, provision DHCP on it, and read the leases back.
//!
//! The run halts on the first structural error (missing MACs, no or several
//! unlisted neighbors, transport failure) and surfaces it to the caller.

pub mod bindings;
pub mod dhcp;
pub mod neighbor;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::{DiscoveryConfig, ReservationConfig};
use crate::error::DiscoveryError;
use crate::inventory::{DeviceParams, Inventory};
use crate::mac::MacAddr;
use crate::models::Resolution;
use crate::transport::{ChannelConnector, CommandChannel};
use dhcp::{DhcpPlan, Reservation};
use neighbor::NeighborResolver;

pub const SHOW_NEIGHBORS: &str = "show ipv6 neighbors";
pub const SHOW_BINDINGS: &str = "show ip dhcp binding";
pub const WRITE_MEMORY: &str = "write memory";

/// Capture key (e.g. `R2_F0_0`) to colon-form MAC, as written by the capture step.
pub type MacMap = BTreeMap<String, String>;

pub fn load_mac_map(path: impl AsRef<Path>) -> anyhow::Result<MacMap> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading MAC map {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing MAC map {}", path.display()))
}

#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub target_address: String,
    pub config_output: String,
    pub leases: Vec<String>,
}

pub struct DiscoveryService {
    connector: Box<dyn ChannelConnector>,
    resolver: NeighborResolver,
    plan: DhcpPlan,
    reservations: Vec<ReservationConfig>,
    observer: String,
    target: String,
    settle: Duration,
    save_config: bool,
}

impl DiscoveryService {
    pub fn new(connector: Box<dyn ChannelConnector>, config: &DiscoveryConfig) -> Self {
        Self {
            connector,
            resolver: NeighborResolver::new(
                config.neighbor_interface.clone(),
                config.address_prefix.clone(),
            ),
            plan: DhcpPlan::from(&config.dhcp),
            reservations: config.dhcp.reservations.clone(),
            observer: config.observer.clone(),
            target: config.target.clone(),
            settle: Duration::from_secs(config.binding_settle_secs),
            save_config: config.save_config,
        }
    }

    /// Pairs each configured reservation with its MAC from the capture map.
    pub fn reservations(&self, macs: &MacMap) -> Result<Vec<Reservation>, DiscoveryError> {
        self.reservations
            .iter()
            .map(|r| {
                let text = macs.get(&r.mac_key).ok_or_else(|| {
                    DiscoveryError::MissingInput(format!("no MAC for {} in the capture map", r.mac_key))
                })?;
                Ok(Reservation {
                    pool: r.pool.clone(),
                    host: r.host,
                    mac: text.parse::<MacAddr>()?,
                })
            })
            .collect()
    }

    /// Reads the observer's neighbor table and resolves the one neighbor not in `known`.
    pub async fn resolve_target(
        &self,
        observer: &DeviceParams,
        known: &HashSet<MacAddr>,
    ) -> Result<String, DiscoveryError> {
        let mut channel = self.connector.connect(observer).await?;
        let output = channel.run_command(SHOW_NEIGHBORS).await;
        disconnect(channel.as_mut(), &observer.host).await;
        let output = output?;

        match self.resolver.resolve_unknown(&output, known) {
            Resolution::Resolved(address) => Ok(address),
            Resolution::NotFound => Err(DiscoveryError::NotFound {
                interface: self.resolver.interface().to_string(),
            }),
            Resolution::Ambiguous(candidates) => Err(DiscoveryError::Ambiguous { candidates }),
        }
    }

    /// Applies the DHCP configuration on `channel` and saves it when enabled.
    pub async fn provision(
        &self,
        channel: &mut dyn CommandChannel,
        reservations: &[Reservation],
    ) -> Result<String, DiscoveryError> {
        let lines = dhcp::build(&self.plan, reservations);
        tracing::info!(statements = lines.len(), "Pushing DHCP configuration");
        let output = channel.run_config_set(&lines).await?;
        if self.save_config {
            channel.run_command(WRITE_MEMORY).await?;
        }
        Ok(output)
    }

    pub async fn read_leases(
        &self,
        channel: &mut dyn CommandChannel,
    ) -> Result<Vec<String>, DiscoveryError> {
        let output = channel.run_command(SHOW_BINDINGS).await?;
        Ok(bindings::parse_bindings(&output))
    }

    /// Full run: resolve the target through the observer, provision it, wait, validate.
    pub async fn run(
        &self,
        inventory: &Inventory,
        macs: &MacMap,
        cancel: &CancellationToken,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        let reservations = self.reservations(macs)?;
        let known: HashSet<MacAddr> = reservations.iter().map(|r| r.mac).collect();

        let observer = inventory
            .get(&self.observer)
            .ok_or_else(|| DiscoveryError::UnknownDevice(self.observer.clone()))?;
        let target_address = self.resolve_target(observer, &known).await?;
        tracing::info!(device = %self.target, address = %target_address, "Target identified");

        let mut target = inventory.get(&self.target).unwrap_or(observer).clone();
        target.host = target_address.clone();

        let mut channel = self.connector.connect(&target).await?;
        let result = self.provision_and_validate(channel.as_mut(), &reservations, cancel).await;
        disconnect(channel.as_mut(), &target.host).await;
        let (config_output, leases) = result?;

        tracing::info!(leases = leases.len(), "DHCP bindings read back");
        Ok(DiscoveryOutcome {
            target_address,
            config_output,
            leases,
        })
    }

    async fn provision_and_validate(
        &self,
        channel: &mut dyn CommandChannel,
        reservations: &[Reservation],
        cancel: &CancellationToken,
    ) -> Result<(String, Vec<String>), DiscoveryError> {
        let config_output = self.provision(channel, reservations).await?;

        tracing::info!(settle_secs = self.settle.as_secs(), "Waiting for clients to lease");
        tokio::select! {
            _ = tokio::time::sleep(self.settle) => {}
            _ = cancel.cancelled() => return Err(DiscoveryError::Cancelled),
        }

        let leases = self.read_leases(channel).await?;
        Ok((config_output, leases))
    }
}

async fn disconnect(channel: &mut dyn CommandChannel, host: &str) {
    if let Err(e) = channel.disconnect().await {
        tracing::warn!(error = %e, host = %host, operation = "disconnect", "disconnect failed");
    }
}
