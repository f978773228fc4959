// Shared test helpers: scripted SNMP sessions and command channels, sample device output
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netman::error::TransportError;
use netman::inventory::DeviceParams;
use netman::transport::{
    ChannelConnector, CommandChannel, SnmpConnector, SnmpSession, VarBind,
};

pub const NEIGHBOR_TABLE: &str = "\
IPv6 Address                              Age Link-layer Addr State Interface
2001:DB8:1::2                               0 c802.1a2b.0000  REACH Fa0/0
2001:DB8:1::3                               1 c803.1a2c.0000  STALE Fa0/0
2001:DB8:1::5                               0 c805.1a2e.0000  REACH Fa0/0
FE80::C805:1AFF:FE2E:0                      0 c805.1a2e.0000  REACH Fa0/0
2001:DB8:2::9                               0 c809.0000.0009  REACH Fa0/1
";

pub const BINDING_TABLE: &str = "\
Bindings from all pools not associated with VRF:
IP address          Client-ID/              Lease expiration        Type
                    Hardware address/
                    User name
10.0.0.2            01c8.021a.2b00.00       Mar 02 2002 12:00 AM    Manual
10.0.0.3            01c8.031a.2c00.00       Mar 02 2002 12:00 AM    Manual
10.0.0.4            01c8.041a.2d00.00       Mar 02 2002 12:05 AM    Automatic
";

pub const R2_MAC: &str = "c8:02:1a:2b:00:00";
pub const R3_MAC: &str = "C8:03:1A:2C:00:00";

pub fn device(host: &str) -> DeviceParams {
    DeviceParams {
        device_type: "cisco_ios".into(),
        host: host.into(),
        username: "admin".into(),
        password: "secret".into(),
    }
}

pub fn row(oid: &str, index: &str, value: &str) -> VarBind {
    VarBind::new(format!("{}.{}", oid, index), index, value)
}

/// Scripted SNMP agent: fixed walk results per OID, queued GET replies.
/// A `None` in the GET queue is a failed read; an empty queue repeats `get_default`.
/// A stalled agent never answers a walk.
#[derive(Clone, Default)]
pub struct FakeSnmpSession {
    pub walks: HashMap<String, Vec<VarBind>>,
    pub gets: Arc<Mutex<VecDeque<Option<String>>>>,
    pub get_default: Option<String>,
    pub unreachable: bool,
    pub stalled: bool,
}

impl FakeSnmpSession {
    pub fn with_walk(mut self, oid: &str, rows: Vec<VarBind>) -> Self {
        self.walks.insert(oid.to_string(), rows);
        self
    }

    pub fn with_gets(self, replies: Vec<Option<&str>>) -> Self {
        *self.gets.lock().unwrap() = replies
            .into_iter()
            .map(|r| r.map(str::to_string))
            .collect();
        self
    }

    pub fn with_get_default(mut self, value: &str) -> Self {
        self.get_default = Some(value.to_string());
        self
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn stalled() -> Self {
        Self {
            stalled: true,
            ..Default::default()
        }
    }
}

fn timeout_error() -> TransportError {
    TransportError::Failed {
        program: "snmpwalk".into(),
        code: 1,
        stderr: "Timeout: No Response".into(),
    }
}

#[async_trait]
impl SnmpSession for FakeSnmpSession {
    async fn walk(&self, oid: &str) -> Result<Vec<VarBind>, TransportError> {
        if self.stalled {
            std::future::pending::<()>().await;
        }
        if self.unreachable {
            return Err(timeout_error());
        }
        Ok(self.walks.get(oid).cloned().unwrap_or_default())
    }

    async fn get(&self, _oid: &str) -> Result<String, TransportError> {
        if self.unreachable {
            return Err(timeout_error());
        }
        let next = self.gets.lock().unwrap().pop_front();
        match next {
            Some(Some(v)) => Ok(v),
            Some(None) => Err(timeout_error()),
            None => self.get_default.clone().ok_or_else(timeout_error),
        }
    }
}

/// Hands out clones of the session registered for a host; unknown hosts are unreachable.
#[derive(Default)]
pub struct FakeSnmpConnector {
    pub sessions: HashMap<String, FakeSnmpSession>,
}

impl SnmpConnector for FakeSnmpConnector {
    fn open(&self, host: &str, _community: &str) -> Box<dyn SnmpSession> {
        Box::new(
            self.sessions
                .get(host)
                .cloned()
                .unwrap_or_else(FakeSnmpSession::unreachable),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Connect(String),
    Command(String, String),
    Config(String, Vec<String>),
    Disconnect(String),
}

/// Command channels answering from a per-host script, recording every call.
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub scripts: HashMap<String, HashMap<String, String>>,
    pub log: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeConnector {
    pub fn script(mut self, host: &str, command: &str, output: &str) -> Self {
        self.scripts
            .entry(host.to_string())
            .or_default()
            .insert(command.to_string(), output.to_string());
        self
    }

    pub fn log(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelConnector for FakeConnector {
    async fn connect(
        &self,
        device: &DeviceParams,
    ) -> Result<Box<dyn CommandChannel>, TransportError> {
        let Some(script) = self.scripts.get(&device.host) else {
            return Err(TransportError::Timeout {
                host: device.host.clone(),
            });
        };
        self.log
            .lock()
            .unwrap()
            .push(Recorded::Connect(device.host.clone()));
        Ok(Box::new(FakeChannel {
            host: device.host.clone(),
            script: script.clone(),
            log: self.log.clone(),
        }))
    }
}

pub struct FakeChannel {
    host: String,
    script: HashMap<String, String>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

#[async_trait]
impl CommandChannel for FakeChannel {
    async fn run_command(&mut self, command: &str) -> Result<String, TransportError> {
        self.log
            .lock()
            .unwrap()
            .push(Recorded::Command(self.host.clone(), command.to_string()));
        Ok(self.script.get(command).cloned().unwrap_or_default())
    }

    async fn run_config_set(&mut self, lines: &[String]) -> Result<String, TransportError> {
        self.log
            .lock()
            .unwrap()
            .push(Recorded::Config(self.host.clone(), lines.to_vec()));
        Ok(format!("{} lines applied", lines.len()))
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        self.log
            .lock()
            .unwrap()
            .push(Recorded::Disconnect(self.host.clone()));
        Ok(())
    }
}
