//! Error types for dlink-driver.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for driver operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Session transport errors (TCP, Telnet, SSH)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Transport layer errors (connection setup, authentication, raw I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (output accumulation, prompt matching).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Prompt pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (lifecycle, command execution).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// Command execution failed
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The device login dialog did not reach a prompt
    #[error("Login failed for user '{user}': {reason}")]
    LoginFailed { user: String, reason: String },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Output parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Uptime string had no recognizable time units
    #[error("Unrecognized uptime string: '{0}'")]
    Uptime(String),
}

/// Result type alias using this crate's Error.
pub type Result<T> = std::result::Result<T, Error>;
