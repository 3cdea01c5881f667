//! Session transports for reaching the switch CLI.
//!
//! Two transports are provided behind one trait: SSH via russh, and a
//! minimal Telnet NVT over a plain TCP stream. The driver layer is
//! transport-agnostic; everything prompt-related happens above this
//! seam.

pub mod config;
mod ssh;
mod telnet;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub use config::{AuthMethod, ConnectConfig, TransportKind};
pub use ssh::SshTransport;
pub use telnet::TelnetTransport;

/// Trait for CLI session transports.
#[async_trait]
pub trait Transport: Send {
    /// Read the next chunk of device output.
    ///
    /// Blocks until data arrives; returns `TransportError::Disconnected`
    /// when the peer has gone away.
    async fn read(&mut self) -> Result<Bytes>;

    /// Write raw bytes to the device.
    async fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Write a command line, applying the transport's line ending.
    async fn send_line(&mut self, line: &str) -> Result<()>;

    /// Send a liveness probe without disturbing the session.
    ///
    /// SSH writes an ASCII NUL on the channel; Telnet sends IAC NOP.
    async fn probe(&mut self) -> Result<()>;

    /// Close the session.
    async fn close(&mut self) -> Result<()>;

    /// Whether the underlying session is known to be closed.
    fn is_closed(&self) -> bool;
}
