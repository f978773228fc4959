// Config loading and validation tests

use std::io::Write;

use netman::config::AppConfig;
use netman::telemetry::oids;

const VALID_CONFIG: &str = r#"
[inventory]
path = "inventory.json"

[discovery]
observer = "R4"
target = "R5"
mac_map_path = "macs.json"

[discovery.dhcp]
interface = "f0/0"
gateway = "10.0.0.1"
netmask = "255.255.255.0"
network = "10.0.0.0"
catch_all_pool = "R4"

[[discovery.dhcp.reservations]]
pool = "R2"
host = "10.0.0.2"
mac_key = "R2_F0_0"

[[discovery.dhcp.reservations]]
pool = "R3"
host = "10.0.0.3"
mac_key = "R3_F0_0"

[polling]
community = "public"
duration_secs = 120
interval_secs = 5
cpu_device = "R1"

[polling.devices]
R1 = "198.51.100.1"
R2 = "198.51.100.2"

[output]
report_path = "out/report.json"
graph_path = "out/cpu.svg"

[server]
port = 8081
host = "0.0.0.0"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.inventory.path, "inventory.json");
    assert_eq!(config.discovery.observer, "R4");
    assert_eq!(config.discovery.dhcp.reservations.len(), 2);
    assert_eq!(config.discovery.dhcp.reservations[1].mac_key, "R3_F0_0");
    assert_eq!(config.polling.devices["R2"], "198.51.100.2");
    assert_eq!(config.output.graph_path, "out/cpu.svg");
    assert_eq!(config.server.port, 8081);
}

#[test]
fn test_config_defaults_apply() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.discovery.neighbor_interface, "Fa0/0");
    assert_eq!(config.discovery.address_prefix, "2001:db8:");
    assert_eq!(config.discovery.binding_settle_secs, 30);
    assert!(config.discovery.save_config);
    assert_eq!(config.polling.cpu_oid, oids::CISCO_AVG_BUSY_1);
    assert_eq!(config.polling.timeout_secs, 2);
    assert_eq!(config.polling.retries, 1);
    assert_eq!(config.server.refresh_secs, 300);
    assert_eq!(config.server.broadcast_capacity, 64);
}

#[test]
fn test_config_server_section_is_optional() {
    let without = VALID_CONFIG.replace("[server]\nport = 8081\nhost = \"0.0.0.0\"\n", "");
    let config = AppConfig::load_from_str(&without).unwrap();
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_inventory_path() {
    let bad = VALID_CONFIG.replace("path = \"inventory.json\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("inventory.path"));
}

#[test]
fn test_config_validation_rejects_gateway_outside_network() {
    let bad = VALID_CONFIG.replace("gateway = \"10.0.0.1\"", "gateway = \"10.0.1.1\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("discovery.dhcp.gateway"));
}

#[test]
fn test_config_validation_rejects_duplicate_pool() {
    let bad = VALID_CONFIG.replace("pool = \"R3\"", "pool = \"R2\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("duplicate pool name R2"));
}

#[test]
fn test_config_validation_rejects_pool_named_like_catch_all() {
    let bad = VALID_CONFIG.replace("pool = \"R3\"", "pool = \"R4\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("duplicate pool name R4"));
}

#[test]
fn test_config_validation_rejects_interval_zero() {
    let bad = VALID_CONFIG.replace("interval_secs = 5", "interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("polling.interval_secs"));
}

#[test]
fn test_config_validation_rejects_duration_zero() {
    let bad = VALID_CONFIG.replace("duration_secs = 120", "duration_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("polling.duration_secs"));
}

#[test]
fn test_config_validation_rejects_unlisted_cpu_device() {
    let bad = VALID_CONFIG.replace("cpu_device = \"R1\"", "cpu_device = \"R9\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("polling.cpu_device"));
}

#[test]
fn test_config_validation_rejects_empty_community() {
    let bad = VALID_CONFIG.replace("community = \"public\"", "community = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("polling.community"));
}

#[test]
fn test_config_rejects_malformed_address() {
    let bad = VALID_CONFIG.replace("host = \"10.0.0.2\"", "host = \"10.0.0\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID_CONFIG.as_bytes()).unwrap();
    let config = AppConfig::load_from(file.path()).unwrap();
    assert_eq!(config.polling.cpu_device, "R1");
}
