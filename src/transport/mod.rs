// Remote device transports: command channel (SSH) and SNMP sessions.
// The core only sees the traits; adapters spawn the system client tools.

mod exec;
pub mod snmp;
pub mod ssh;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::inventory::DeviceParams;

pub use exec::{ExecResult, exec};
pub use snmp::{NetSnmpConnector, NetSnmpSession};
pub use ssh::{SshChannel, SshConnector};

/// Line-oriented command session to one device.
#[async_trait]
pub trait CommandChannel: Send {
    /// Runs one exec-mode command and returns its captured output.
    async fn run_command(&mut self, command: &str) -> Result<String, TransportError>;

    /// Applies configuration lines in order and returns the applied-config output.
    async fn run_config_set(&mut self, lines: &[String]) -> Result<String, TransportError>;

    async fn disconnect(&mut self) -> Result<(), TransportError>;
}

#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn connect(
        &self,
        device: &DeviceParams,
    ) -> Result<Box<dyn CommandChannel>, TransportError>;
}

/// One row of an SNMP walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// Full numeric OID, without a leading dot.
    pub oid: String,
    /// OID suffix below the walked base OID.
    pub index: String,
    pub value: String,
}

impl VarBind {
    pub fn new(oid: impl Into<String>, index: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            index: index.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
pub trait SnmpSession: Send + Sync {
    async fn walk(&self, oid: &str) -> Result<Vec<VarBind>, TransportError>;

    async fn get(&self, oid: &str) -> Result<String, TransportError>;
}

pub trait SnmpConnector: Send + Sync {
    fn open(&self, host: &str, community: &str) -> Box<dyn SnmpSession>;
}
