// SNMPv2c sessions over the net-snmp command line tools (snmpwalk / snmpget)

use async_trait::async_trait;
use tokio::process::Command;

use super::{SnmpConnector, SnmpSession, VarBind, exec};
use crate::error::TransportError;

const SNMPWALK: &str = "snmpwalk";
const SNMPGET: &str = "snmpget";

#[derive(Debug, Clone)]
pub struct NetSnmpConnector {
    pub timeout_secs: u64,
    pub retries: u32,
}

impl SnmpConnector for NetSnmpConnector {
    fn open(&self, host: &str, community: &str) -> Box<dyn SnmpSession> {
        Box::new(NetSnmpSession::new(
            host,
            community,
            self.timeout_secs,
            self.retries,
        ))
    }
}

pub struct NetSnmpSession {
    host: String,
    community: String,
    timeout_secs: u64,
    retries: u32,
}

impl NetSnmpSession {
    pub fn new(host: &str, community: &str, timeout_secs: u64, retries: u32) -> Self {
        Self {
            host: host.to_string(),
            community: community.to_string(),
            timeout_secs,
            retries,
        }
    }

    /// Tool arguments: numeric OIDs (`-On`), numeric enum values (`-Oe`) so
    /// ifOperStatus reads `1`/`2` even with IF-MIB loaded, then `output_flags`.
    pub fn args(&self, output_flags: &str, oid: &str) -> Vec<String> {
        vec![
            "-v2c".into(),
            "-c".into(),
            self.community.clone(),
            "-t".into(),
            self.timeout_secs.to_string(),
            "-r".into(),
            self.retries.to_string(),
            "-On".into(),
            "-Oe".into(),
            output_flags.into(),
            self.host.clone(),
            oid.into(),
        ]
    }

    fn command(&self, program: &str, output_flags: &str, oid: &str) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.args(output_flags, oid));
        cmd
    }
}

#[async_trait]
impl SnmpSession for NetSnmpSession {
    async fn walk(&self, oid: &str) -> Result<Vec<VarBind>, TransportError> {
        let stdout = exec(self.command(SNMPWALK, "-Oq", oid), None)
            .await?
            .into_stdout(SNMPWALK)?;
        let rows = parse_walk_output(oid, &stdout);
        tracing::debug!(host = %self.host, oid, rows = rows.len(), "SNMP walk");
        Ok(rows)
    }

    async fn get(&self, oid: &str) -> Result<String, TransportError> {
        let stdout = exec(self.command(SNMPGET, "-Oqv", oid), None)
            .await?
            .into_stdout(SNMPGET)?;
        Ok(unquote(stdout.trim()).to_string())
    }
}

/// Parses `snmpwalk -On -Oq` output (`.1.3.6... value` per line) into rows under `base`.
/// Lines that are not OID rows, or that report a missing object, are dropped.
pub fn parse_walk_output(base: &str, text: &str) -> Vec<VarBind> {
    let base = base.trim_start_matches('.');
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let (oid, value) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let oid = oid.trim_start_matches('.');
            if oid.is_empty() || !oid.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
                return None;
            }
            let value = value.trim();
            if value.starts_with("No Such") || value.starts_with("No more variables") {
                return None;
            }
            let index = oid
                .strip_prefix(base)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(oid);
            Some(VarBind::new(oid, index, unquote(value)))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
