// DHCP provisioning: ordered IOS configuration statements for the gateway router

use std::net::Ipv4Addr;

use crate::config::DhcpConfig;
use crate::mac::MacAddr;

/// Gateway-side addressing shared by every pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpPlan {
    pub interface: String,
    pub gateway: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub network: Ipv4Addr,
    pub catch_all_pool: String,
}

impl From<&DhcpConfig> for DhcpPlan {
    fn from(c: &DhcpConfig) -> Self {
        Self {
            interface: c.interface.clone(),
            gateway: c.gateway,
            netmask: c.netmask,
            network: c.network,
            catch_all_pool: c.catch_all_pool.clone(),
        }
    }
}

/// A fixed lease for one known client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub pool: String,
    pub host: Ipv4Addr,
    pub mac: MacAddr,
}

/// Builds the statements in the order the device must apply them:
/// gateway interface, excluded gateway address, one host pool per reservation, catch-all pool.
/// Every pool block is closed with `exit` before the next opens.
pub fn build(plan: &DhcpPlan, reservations: &[Reservation]) -> Vec<String> {
    let mut lines = vec![
        format!("interface {}", plan.interface),
        format!("ip address {} {}", plan.gateway, plan.netmask),
        "no shutdown".to_string(),
        "exit".to_string(),
        format!("ip dhcp excluded-address {}", plan.gateway),
    ];

    for r in reservations {
        lines.push(format!("ip dhcp pool {}", r.pool));
        lines.push(format!("host {} {}", r.host, plan.netmask));
        lines.push(format!("client-identifier {}", r.mac.client_id()));
        lines.push(format!("default-router {}", plan.gateway));
        lines.push("exit".to_string());
    }

    lines.push(format!("ip dhcp pool {}", plan.catch_all_pool));
    lines.push(format!("network {} {}", plan.network, plan.netmask));
    lines.push(format!("default-router {}", plan.gateway));
    lines.push("exit".to_string());
    lines
}
