use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::Deserialize;

use crate::telemetry::oids;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub inventory: InventoryConfig,
    pub discovery: DiscoveryConfig,
    pub polling: PollingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Device whose neighbor table is read.
    pub observer: String,
    /// Device to resolve and configure. Falls back to the observer's credentials if absent from the inventory.
    pub target: String,
    /// JSON map of capture key to MAC address, written by the capture step.
    pub mac_map_path: String,
    #[serde(default = "default_neighbor_interface")]
    pub neighbor_interface: String,
    /// Only neighbor addresses with this prefix are candidates; empty accepts every address.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
    /// Wait before reading the lease table back.
    #[serde(default = "default_binding_settle_secs")]
    pub binding_settle_secs: u64,
    #[serde(default = "default_save_config")]
    pub save_config: bool,
    pub dhcp: DhcpConfig,
}

fn default_neighbor_interface() -> String {
    "Fa0/0".into()
}

fn default_address_prefix() -> String {
    "2001:db8:".into()
}

fn default_binding_settle_secs() -> u64 {
    30
}

fn default_save_config() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DhcpConfig {
    pub interface: String,
    pub gateway: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub network: Ipv4Addr,
    /// Pool serving every client without a reservation.
    pub catch_all_pool: String,
    #[serde(default)]
    pub reservations: Vec<ReservationConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationConfig {
    pub pool: String,
    pub host: Ipv4Addr,
    /// Key of this client's MAC in the MAC map.
    pub mac_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub community: String,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Device whose CPU is sampled.
    pub cpu_device: String,
    #[serde(default = "default_cpu_oid")]
    pub cpu_oid: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Device name to monitoring address.
    pub devices: BTreeMap<String, String>,
}

fn default_duration_secs() -> u64 {
    120
}

fn default_interval_secs() -> u64 {
    5
}

fn default_cpu_oid() -> String {
    oids::CISCO_AVG_BUSY_1.into()
}

fn default_timeout_secs() -> u64 {
    2
}

fn default_retries() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub report_path: String,
    pub graph_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Pause between poll cycles in serve mode.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// Max number of CPU samples buffered for /ws/cpu (slow clients may lag).
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            refresh_secs: default_refresh_secs(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8081
}

fn default_refresh_secs() -> u64 {
    300
}

fn default_broadcast_capacity() -> usize {
    64
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.inventory.path.is_empty(),
            "inventory.path must be non-empty"
        );

        let d = &self.discovery;
        anyhow::ensure!(!d.observer.is_empty(), "discovery.observer must be non-empty");
        anyhow::ensure!(!d.target.is_empty(), "discovery.target must be non-empty");
        anyhow::ensure!(
            !d.mac_map_path.is_empty(),
            "discovery.mac_map_path must be non-empty"
        );
        anyhow::ensure!(
            !d.neighbor_interface.is_empty(),
            "discovery.neighbor_interface must be non-empty"
        );
        anyhow::ensure!(
            !d.dhcp.interface.is_empty(),
            "discovery.dhcp.interface must be non-empty"
        );
        anyhow::ensure!(
            !d.dhcp.catch_all_pool.is_empty(),
            "discovery.dhcp.catch_all_pool must be non-empty"
        );
        let mask = u32::from(d.dhcp.netmask);
        anyhow::ensure!(
            u32::from(d.dhcp.gateway) & mask == u32::from(d.dhcp.network) & mask,
            "discovery.dhcp.gateway {} is outside network {}/{}",
            d.dhcp.gateway,
            d.dhcp.network,
            d.dhcp.netmask
        );
        let mut pools = std::collections::HashSet::new();
        pools.insert(d.dhcp.catch_all_pool.as_str());
        for r in &d.dhcp.reservations {
            anyhow::ensure!(
                pools.insert(r.pool.as_str()),
                "discovery.dhcp.reservations: duplicate pool name {}",
                r.pool
            );
            anyhow::ensure!(
                !r.mac_key.is_empty(),
                "discovery.dhcp.reservations: pool {} has an empty mac_key",
                r.pool
            );
        }

        let p = &self.polling;
        anyhow::ensure!(!p.community.is_empty(), "polling.community must be non-empty");
        anyhow::ensure!(
            p.duration_secs > 0,
            "polling.duration_secs must be > 0, got {}",
            p.duration_secs
        );
        anyhow::ensure!(
            p.interval_secs > 0,
            "polling.interval_secs must be > 0, got {}",
            p.interval_secs
        );
        anyhow::ensure!(!p.devices.is_empty(), "polling.devices must be non-empty");
        anyhow::ensure!(
            p.devices.contains_key(&p.cpu_device),
            "polling.cpu_device {} is not listed in polling.devices",
            p.cpu_device
        );

        anyhow::ensure!(
            !self.output.report_path.is_empty(),
            "output.report_path must be non-empty"
        );
        anyhow::ensure!(
            !self.output.graph_path.is_empty(),
            "output.graph_path must be non-empty"
        );

        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.server.refresh_secs > 0,
            "server.refresh_secs must be > 0, got {}",
            self.server.refresh_secs
        );
        anyhow::ensure!(
            self.server.broadcast_capacity > 0,
            "server.broadcast_capacity must be > 0, got {}",
            self.server.broadcast_capacity
        );
        Ok(())
    }
}
