//! Connection configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Session protocol used to reach the switch CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// SSH (default, port 22).
    #[default]
    Ssh,

    /// Telnet (port 23). Older D-Link firmware ships with SSH disabled.
    Telnet,
}

impl TransportKind {
    /// The well-known port for this protocol.
    pub fn default_port(self) -> u16 {
        match self {
            TransportKind::Ssh => 22,
            TransportKind::Telnet => 23,
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Ssh => write!(f, "ssh"),
            TransportKind::Telnet => write!(f, "telnet"),
        }
    }
}

/// Connection configuration shared by both transports.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// TCP port. `None` selects the transport's well-known port.
    pub port: Option<u16>,

    /// Username for authentication.
    pub username: String,

    /// Authentication method.
    pub auth: AuthMethod,

    /// Connection and per-read timeout.
    pub timeout: Duration,

    /// Terminal width for the PTY (SSH only).
    pub terminal_width: u32,

    /// Terminal height for the PTY (SSH only).
    pub terminal_height: u32,
}

impl ConnectConfig {
    /// Resolve the effective port for the given transport.
    pub fn port_for(&self, kind: TransportKind) -> u16 {
        self.port.unwrap_or_else(|| kind.default_port())
    }
}

/// Authentication method.
///
/// Passwords are wrapped in [`SecretString`] so they never leak through
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// No authentication.
    None,

    /// Password authentication. Used for SSH password auth and for the
    /// Telnet login dialog.
    Password(SecretString),

    /// Private key authentication (SSH only).
    PrivateKey {
        /// Path to the private key file.
        path: PathBuf,
        /// Optional passphrase for encrypted keys.
        passphrase: Option<SecretString>,
    },
}
