//! The D-Link driver implementation.

use std::time::Instant;

use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, info, warn};
use regex::bytes::Regex;
use secrecy::ExposeSecret;

use super::NetworkDriver;
use super::config::{ConfigSource, DeviceConfig};
use super::response::Response;
use crate::channel::PatternBuffer;
use crate::error::{ChannelError, DriverError, Error, Result};
use crate::parser::{ArpEntry, Facts, MacTableEntry, parse_arp_table, parse_facts, parse_mac_table};
use crate::profile::DeviceProfile;
use crate::transport::{
    ConnectConfig, SshTransport, TelnetTransport, Transport, TransportKind, config::AuthMethod,
};

/// Driver for D-Link managed switches.
///
/// Construct via [`DriverBuilder`](super::DriverBuilder). The driver
/// handles session preparation on `open` (the Telnet login dialog and
/// disarming the CLI pager) and undoes it on `close`, so commands in
/// between see complete, unpaged output.
pub struct DlinkDriver {
    /// Connection parameters.
    config: ConnectConfig,

    /// Selected session transport.
    kind: TransportKind,

    /// Prompt/pager/failure patterns.
    profile: DeviceProfile,

    /// Live transport (None when disconnected).
    transport: Option<Box<dyn Transport>>,

    /// Accumulated device output.
    buffer: PatternBuffer,

    /// Whether `enable clipaging` must be sent back on close.
    restore_paging: bool,
}

impl DlinkDriver {
    /// Create a new driver. Does not connect.
    pub(crate) fn new(config: ConnectConfig, kind: TransportKind, profile: DeviceProfile) -> Self {
        Self {
            config,
            kind,
            profile,
            transport: None,
            buffer: PatternBuffer::default(),
            restore_paging: false,
        }
    }

    /// Check if the driver is connected.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    fn transport_mut(&mut self) -> Result<&mut Box<dyn Transport>> {
        self.transport
            .as_mut()
            .ok_or_else(|| Error::from(DriverError::NotConnected))
    }

    /// Read until one of `patterns` matches the buffer tail.
    ///
    /// Returns the index of the pattern that matched and the buffered
    /// output up to and including the match.
    async fn read_until(&mut self, patterns: &[&Regex]) -> Result<(usize, Vec<u8>)> {
        let timeout = self.config.timeout;
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            for (idx, pattern) in patterns.iter().enumerate() {
                if self.buffer.tail_contains(pattern) {
                    return Ok((idx, self.buffer.take()));
                }
            }

            let transport = self.transport_mut()?;
            let chunk = tokio::time::timeout_at(deadline, transport.read())
                .await
                .map_err(|_| ChannelError::PatternTimeout(timeout))??;
            self.buffer.extend(&chunk);
        }
    }

    /// Run the login dialog until the device prompt appears.
    ///
    /// SSH sessions authenticate in-protocol and go straight to the
    /// prompt; Telnet sessions answer the `UserName:`/`PassWord:`
    /// prompts on the way.
    async fn login(&mut self) -> Result<()> {
        let prompt = self.profile.prompt_pattern.clone();
        let username_re = self.profile.username_prompt.clone();
        let password_re = self.profile.password_prompt.clone();
        let username = self.config.username.clone();
        let password = match &self.config.auth {
            AuthMethod::Password(secret) => Some(secret.clone()),
            _ => None,
        };

        let mut password_attempts = 0u8;
        loop {
            let (idx, _) = self
                .read_until(&[&prompt, &username_re, &password_re])
                .await
                .map_err(|e| match e {
                    Error::Channel(ChannelError::PatternTimeout(_)) => {
                        Error::from(DriverError::LoginFailed {
                            user: username.clone(),
                            reason: "no device prompt before timeout".to_string(),
                        })
                    }
                    other => other,
                })?;

            match idx {
                0 => {
                    debug!("device prompt reached");
                    return Ok(());
                }
                1 => {
                    debug!("answering username prompt");
                    self.transport_mut()?.send_line(&username).await?;
                }
                _ => {
                    // A second password prompt means the first one was
                    // rejected
                    if password_attempts > 0 {
                        return Err(DriverError::LoginFailed {
                            user: username.clone(),
                            reason: "password rejected by device".to_string(),
                        }
                        .into());
                    }
                    password_attempts += 1;

                    let Some(ref secret) = password else {
                        return Err(DriverError::LoginFailed {
                            user: username.clone(),
                            reason: "device asked for a password but none was configured"
                                .to_string(),
                        }
                        .into());
                    };
                    debug!("answering password prompt");
                    self.transport_mut()?.send_line(secret.expose_secret()).await?;
                }
            }
        }
    }

    /// Probe the CLI pager and disarm it for the session.
    ///
    /// Sends the probe command and watches whether the device parks on
    /// the pager banner or runs straight to the prompt. When the pager
    /// is active it is quit, `disable clipaging` is sent, and the
    /// driver remembers to re-enable it on close.
    async fn setup_paging(&mut self) -> Result<()> {
        let prompt = self.profile.prompt_pattern.clone();
        let pager = self.profile.pager_prompt.clone();
        let probe = self.profile.probe_command.clone();
        let quit = self.profile.pager_quit.clone();

        self.buffer.clear();
        self.transport_mut()?.send_line(&probe).await?;
        let (idx, _) = self.read_until(&[&prompt, &pager]).await?;

        if idx == 1 {
            debug!("clipaging enabled on device; disabling for this session");
            self.restore_paging = true;

            self.transport_mut()?.write(quit.as_bytes()).await?;
            self.read_until(&[&prompt]).await?;

            let disable = self.profile.disable_paging_command.clone();
            let response = self.execute(&disable).await?;
            if let Some(message) = response.failure_message {
                warn!("could not disable clipaging: {message}");
            }
        } else {
            debug!("clipaging already disabled on device");
        }

        Ok(())
    }

    async fn initialize(&mut self) -> Result<()> {
        self.login().await?;
        self.setup_paging().await
    }

    /// Send a command and wait for the prompt.
    pub async fn execute(&mut self, command: &str) -> Result<Response> {
        let prompt = self.profile.prompt_pattern.clone();

        debug!("sending command: {command}");
        self.buffer.clear();
        let start = Instant::now();
        self.transport_mut()?.send_line(command).await?;

        let (_, data) = self.read_until(&[&prompt]).await?;
        let elapsed = start.elapsed();
        debug!("received {} bytes for '{command}'", data.len());

        let raw_result = String::from_utf8_lossy(&data).to_string();
        let prompt_text = match prompt.find(&data) {
            Some(m) => String::from_utf8_lossy(&data[m.start()..]).trim().to_string(),
            None => String::new(),
        };
        let result = normalize_output(&raw_result, command);

        if let Some(failure) = self.profile.detect_failure(&result) {
            return Ok(Response::failed(
                command,
                result,
                raw_result,
                prompt_text,
                elapsed,
                failure,
            ));
        }

        Ok(Response::new(command, result, raw_result, prompt_text, elapsed))
    }
}

#[async_trait]
impl NetworkDriver for DlinkDriver {
    async fn open(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let port = self.config.port_for(self.kind);
        info!(
            "opening {} session to {}:{}",
            self.kind, self.config.host, port
        );

        let transport: Box<dyn Transport> = match self.kind {
            TransportKind::Ssh => Box::new(SshTransport::connect(&self.config).await?),
            TransportKind::Telnet => Box::new(TelnetTransport::connect(&self.config).await?),
        };
        self.transport = Some(transport);
        self.buffer.clear();
        self.restore_paging = false;

        if let Err(e) = self.initialize().await {
            // Tear the half-open session down rather than leaving the
            // driver in a connected-but-unprepared state
            if let Some(mut transport) = self.transport.take() {
                let _ = transport.close().await;
            }
            return Err(e);
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Ok(());
        }

        if self.restore_paging {
            let restore = self.profile.restore_paging_command.clone();
            if let Err(e) = self.execute(&restore).await {
                warn!("failed to restore clipaging: {e}");
            }
            self.restore_paging = false;
        }

        if let Some(mut transport) = self.transport.take() {
            transport.close().await?;
        }

        info!("session to {} closed", self.config.host);
        Ok(())
    }

    async fn is_alive(&mut self) -> bool {
        match self.transport.as_mut() {
            None => false,
            Some(transport) => !transport.is_closed() && transport.probe().await.is_ok(),
        }
    }

    async fn cli(&mut self, commands: &[&str]) -> Result<IndexMap<String, Response>> {
        let mut output = IndexMap::with_capacity(commands.len());
        for &command in commands {
            let response = self.execute(command).await?;
            output.insert(command.to_string(), response);
        }
        Ok(output)
    }

    async fn get_facts(&mut self) -> Result<Facts> {
        let probe = self.profile.probe_command.clone();
        let response = ensure_success(self.execute(&probe).await?)?;
        Ok(parse_facts(&response.result))
    }

    async fn get_config(&mut self, source: ConfigSource) -> Result<DeviceConfig> {
        let mut device_config = DeviceConfig::default();

        if source.includes_running() {
            let response = self.execute("show config current_config").await?;
            device_config.running = if response.is_success() && response.contains("Configuration")
            {
                response.result
            } else {
                // Older firmware exposes the running config under a
                // different name
                ensure_success(self.execute("show config active").await?)?.result
            };
        }

        if source.includes_candidate() {
            device_config.candidate =
                ensure_success(self.execute("show config config_in_nvram").await?)?.result;
        }

        Ok(device_config)
    }

    async fn get_arp_table(&mut self) -> Result<Vec<ArpEntry>> {
        let response = ensure_success(self.execute("show arpentry").await?)?;
        Ok(parse_arp_table(&response.result))
    }

    async fn get_mac_address_table(&mut self) -> Result<Vec<MacTableEntry>> {
        let response = ensure_success(self.execute("show fdb").await?)?;
        Ok(parse_mac_table(&response.result))
    }
}

/// Strip the command echo and the trailing prompt line from raw output.
fn normalize_output(raw: &str, command: &str) -> String {
    let output = raw.trim_start_matches(['\r', '\n']);
    let output = output.strip_prefix(command).unwrap_or(output);
    let output = output.trim_start_matches(['\r', '\n']);

    match output.rfind('\n') {
        Some(pos) => output[..pos].trim_end().to_string(),
        // Single line left means only the prompt came back
        None => String::new(),
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    match response.failure_message {
        Some(ref message) => Err(DriverError::CommandFailed {
            command: response.command.clone(),
            message: message.clone(),
        }
        .into()),
        None => Ok(response),
    }
}
