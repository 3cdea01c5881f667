//! Builder for creating device drivers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::dlink::DlinkDriver;
use crate::error::{DriverError, Result};
use crate::profile::DeviceProfile;
use crate::transport::config::{AuthMethod, ConnectConfig, TransportKind};

/// Builder for constructing a [`DlinkDriver`].
///
/// # Example
///
/// ```rust,no_run
/// use dlink_driver::{DriverBuilder, TransportKind};
///
/// # fn example() -> Result<(), dlink_driver::Error> {
/// let driver = DriverBuilder::new("10.90.90.90")
///     .username("admin")
///     .password("secret")
///     .transport(TransportKind::Telnet)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    host: String,
    port: Option<u16>,
    username: Option<String>,
    auth: AuthMethod,
    transport: TransportKind,
    timeout: Duration,
    terminal_width: u32,
    terminal_height: u32,
    profile: Option<DeviceProfile>,
}

impl DriverBuilder {
    /// Create a new driver builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: None,
            auth: AuthMethod::None,
            transport: TransportKind::default(),
            timeout: Duration::from_secs(60),
            terminal_width: 511,
            terminal_height: 24,
            profile: None,
        }
    }

    /// Set the TCP port. Defaults to the transport's well-known port
    /// (22 for SSH, 23 for Telnet).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Password(SecretString::from(password.into()));
        self
    }

    /// Set private key authentication (SSH only).
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        };
        self
    }

    /// Set private key authentication with passphrase (SSH only).
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        };
        self
    }

    /// Select the session transport (default: SSH).
    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Set the connection and per-command timeout (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set terminal dimensions for the SSH PTY.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Override the device profile.
    pub fn profile(mut self, profile: DeviceProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Build the driver.
    ///
    /// This validates the configuration but does not connect; call
    /// `open()` on the returned driver to establish the session.
    pub fn build(self) -> Result<DlinkDriver> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        if self.transport == TransportKind::Telnet {
            if let AuthMethod::PrivateKey { .. } = self.auth {
                return Err(DriverError::InvalidConfig {
                    message: "Private key authentication requires the SSH transport".to_string(),
                }
                .into());
            }
        }

        let config = ConnectConfig {
            host: self.host,
            port: self.port,
            username,
            auth: self.auth,
            timeout: self.timeout,
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
        };

        Ok(DlinkDriver::new(
            config,
            self.transport,
            self.profile.unwrap_or_default(),
        ))
    }
}
