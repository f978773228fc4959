// Command channel over SSH (russh client, password authentication)

use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use tokio::time::{Duration, timeout};

use super::{ChannelConnector, CommandChannel};
use crate::error::TransportError;
use crate::inventory::DeviceParams;

pub const DEFAULT_PORT: u16 = 22;

pub struct SshConnector {
    pub port: u16,
    pub connect_timeout_secs: u64,
    /// Upper bound on one scripted session, from opening the shell to the device closing it.
    pub command_timeout_secs: u64,
}

impl Default for SshConnector {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout_secs: 10,
            command_timeout_secs: 60,
        }
    }
}

/// Lab devices regenerate their host keys on every rebuild; any key is accepted.
struct LabHandler;

#[async_trait]
impl client::Handler for LabHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

#[async_trait]
impl ChannelConnector for SshConnector {
    async fn connect(
        &self,
        device: &DeviceParams,
    ) -> Result<Box<dyn CommandChannel>, TransportError> {
        tracing::info!(host = %device.host, device_type = %device.device_type, "Opening SSH channel");
        let host = device.host.clone();
        let ssh_err = |source| TransportError::Ssh {
            host: host.clone(),
            source,
        };

        let config = Arc::new(client::Config {
            inactivity_timeout: Some(Duration::from_secs(self.command_timeout_secs)),
            ..Default::default()
        });
        let mut handle = timeout(
            Duration::from_secs(self.connect_timeout_secs),
            client::connect(config, (device.host.as_str(), self.port), LabHandler),
        )
        .await
        .map_err(|_| TransportError::Timeout { host: host.clone() })?
        .map_err(ssh_err)?;

        let authenticated = handle
            .authenticate_password(device.username.clone(), device.password.clone())
            .await
            .map_err(ssh_err)?;
        if !authenticated {
            return Err(TransportError::AuthFailed {
                host,
                username: device.username.clone(),
            });
        }

        Ok(Box::new(SshChannel {
            host,
            handle: Some(handle),
            command_timeout: Duration::from_secs(self.command_timeout_secs),
        }))
    }
}

/// One authenticated connection; each call scripts the device CLI on a fresh shell channel.
pub struct SshChannel {
    host: String,
    handle: Option<Handle<LabHandler>>,
    command_timeout: Duration,
}

impl SshChannel {
    fn ssh_err(&self, source: russh::Error) -> TransportError {
        TransportError::Ssh {
            host: self.host.clone(),
            source,
        }
    }

    async fn session(&self, script: String) -> Result<String, TransportError> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(TransportError::Closed {
                host: self.host.clone(),
            });
        };

        let mut channel = handle
            .channel_open_session()
            .await
            .map_err(|e| self.ssh_err(e))?;
        channel
            .request_pty(false, "vt100", 200, 24, 0, 0, &[])
            .await
            .map_err(|e| self.ssh_err(e))?;
        channel
            .request_shell(true)
            .await
            .map_err(|e| self.ssh_err(e))?;
        channel
            .data(script.as_bytes())
            .await
            .map_err(|e| self.ssh_err(e))?;

        // The script ends with `exit`, so the device closes the channel when done.
        let mut output = Vec::new();
        let read = async {
            while let Some(msg) = channel.wait().await {
                match msg {
                    ChannelMsg::Data { ref data } => output.extend_from_slice(data),
                    ChannelMsg::ExitStatus { exit_status } => {
                        tracing::trace!(host = %self.host, exit_status, "Shell exited");
                    }
                    ChannelMsg::Close => break,
                    _ => {}
                }
            }
        };
        timeout(self.command_timeout, read)
            .await
            .map_err(|_| TransportError::Timeout {
                host: self.host.clone(),
            })?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[async_trait]
impl CommandChannel for SshChannel {
    async fn run_command(&mut self, command: &str) -> Result<String, TransportError> {
        self.session(exec_script(command)).await
    }

    async fn run_config_set(&mut self, lines: &[String]) -> Result<String, TransportError> {
        self.session(config_script(lines)).await
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        if let Some(handle) = self.handle.take() {
            handle
                .disconnect(Disconnect::ByApplication, "", "English")
                .await
                .map_err(|e| self.ssh_err(e))?;
            tracing::debug!(host = %self.host, "SSH channel closed");
        }
        Ok(())
    }
}

/// Script for one exec-mode command with paging disabled.
pub fn exec_script(command: &str) -> String {
    format!("terminal length 0\n{}\nexit\n", command.trim_end())
}

/// Script entering configuration mode, applying `lines` in order, and leaving it.
pub fn config_script(lines: &[String]) -> String {
    let mut script = String::from("configure terminal\n");
    for line in lines {
        script.push_str(line.trim_end());
        script.push('\n');
    }
    script.push_str("end\nexit\n");
    script
}
