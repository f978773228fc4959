// Numeric OIDs polled from each device

/// IF-MIB ifDescr.
pub const IF_DESCR: &str = "1.3.6.1.2.1.2.2.1.2";

/// IF-MIB ifOperStatus (1 = up, 2 = down, ...).
pub const IF_OPER_STATUS: &str = "1.3.6.1.2.1.2.2.1.8";

/// IP-MIB ipAdEntAddr; the value is the IPv4 address.
pub const IP_AD_ENT_ADDR: &str = "1.3.6.1.2.1.4.20.1.1";

/// IP-MIB ipAddressIfIndex restricted to ipv6(2) rows; the address is the last 16 index components.
pub const IP_ADDRESS_IF_INDEX_V6: &str = "1.3.6.1.2.1.4.34.1.3.2";

/// OLD-CISCO-CPU-MIB avgBusy1, one-minute CPU busy percentage.
pub const CISCO_AVG_BUSY_1: &str = "1.3.6.1.4.1.9.2.1.57.0";
