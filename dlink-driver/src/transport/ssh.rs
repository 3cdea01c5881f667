//! SSH transport implementation using russh.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use russh::client::{self, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use russh::{Channel, ChannelMsg, Disconnect};
use secrecy::ExposeSecret;

use super::Transport;
use super::config::{AuthMethod, ConnectConfig, TransportKind};
use crate::error::{Result, TransportError};

/// SSH transport wrapping a russh client session with a PTY channel.
pub struct SshTransport {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// The PTY/shell channel the CLI runs on.
    channel: Channel<Msg>,
}

impl SshTransport {
    /// Connect to the device, authenticate, and open a shell channel.
    pub async fn connect(config: &ConnectConfig) -> Result<Self> {
        let port = config.port_for(TransportKind::Ssh);

        let ssh_config = Arc::new(client::Config {
            keepalive_interval: Some(Duration::from_secs(30)),
            ..Default::default()
        });

        let handler = SshHandler {
            host: config.host.clone(),
        };

        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(ssh_config, (config.host.as_str(), port), handler),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(TransportError::Ssh)?;

        Self::authenticate(&mut session, config).await?;

        let channel = session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_pty(
                true,
                "xterm",
                config.terminal_width,
                config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_shell(true)
            .await
            .map_err(TransportError::Ssh)?;

        debug!("ssh session established to {}:{}", config.host, port);

        Ok(Self { session, channel })
    }

    /// Authenticate with the server.
    async fn authenticate(session: &mut Handle<SshHandler>, config: &ConnectConfig) -> Result<()> {
        let success = match &config.auth {
            AuthMethod::None => session
                .authenticate_none(&config.username)
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::Password(password) => session
                .authenticate_password(&config.username, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::PrivateKey { path, passphrase } => {
                let key = load_secret_key(path, passphrase.as_ref().map(|p| p.expose_secret()))
                    .map_err(|e| TransportError::Key(e.to_string()))?;

                // Pick the best RSA hash algorithm the server supports
                let hash_alg = session
                    .best_supported_rsa_hash()
                    .await
                    .map_err(TransportError::Ssh)?
                    .flatten();

                session
                    .authenticate_publickey(
                        &config.username,
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await
                    .map_err(TransportError::Ssh)?
                    .success()
            }
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for SshTransport {
    async fn read(&mut self) -> Result<Bytes> {
        loop {
            match self.channel.wait().await {
                Some(ChannelMsg::Data { ref data }) => {
                    return Ok(Bytes::copy_from_slice(data));
                }
                Some(ChannelMsg::ExtendedData { ref data, .. }) => {
                    return Ok(Bytes::copy_from_slice(data));
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(TransportError::Disconnected.into());
                }
                Some(_) => continue,
            }
        }
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.channel.data(data).await.map_err(TransportError::Ssh)?;
        Ok(())
    }

    async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut out = Vec::with_capacity(line.len() + 1);
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
        self.write(&out).await
    }

    async fn probe(&mut self) -> Result<()> {
        if self.session.is_closed() {
            return Err(TransportError::Disconnected.into());
        }
        // An ASCII NUL keeps the channel alive without echoing anything
        self.write(&[0u8]).await
    }

    async fn close(&mut self) -> Result<()> {
        self.session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.session.is_closed()
    }
}

/// SSH client handler.
///
/// Host keys are accepted without verification: switch management
/// networks rarely have a curated known_hosts, and the original
/// deployments this replaces connected with strict checking off.
struct SshHandler {
    host: String,
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        debug!("accepting host key from {}", self.host);
        Ok(true)
    }
}
