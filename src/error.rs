// Domain error types

use thiserror::Error;

/// Malformed link-layer address text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed link-layer address: {input:?}")]
pub struct MacFormatError {
    pub input: String,
}

impl MacFormatError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Failures of the remote transports (SSH command channel, SNMP tools).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("ssh to {host}: {source}")]
    Ssh {
        host: String,
        #[source]
        source: russh::Error,
    },

    #[error("ssh authentication as {username} rejected by {host}")]
    AuthFailed { host: String, username: String },

    #[error("{host} did not answer in time")]
    Timeout { host: String },

    #[error("session to {host} is closed")]
    Closed { host: String },
}

/// Structural failures of a discovery run. Each one halts the run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no unlisted neighbor on {interface}; ping the lab devices to populate the table and retry")]
    NotFound { interface: String },

    #[error("ambiguous neighbor resolution, {} candidates: {}", candidates.len(), candidates.join(", "))]
    Ambiguous { candidates: Vec<String> },

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("device {0} is not in the inventory")]
    UnknownDevice(String),

    #[error("discovery cancelled")]
    Cancelled,

    #[error(transparent)]
    Format(#[from] MacFormatError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
