//! High-level driver for device interaction.
//!
//! The driver layer provides the vendor-neutral operation surface:
//! session lifecycle, raw CLI access, and the structured getters.

mod builder;
mod config;
mod dlink;
mod response;

pub use builder::DriverBuilder;
pub use config::{ConfigSource, DeviceConfig};
pub use dlink::DlinkDriver;
pub use response::Response;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::Result;
use crate::parser::{ArpEntry, Facts, MacTableEntry};

/// Vendor-neutral device driver operations.
///
/// This is the operation set network-automation frameworks standardize
/// on for read-path drivers; [`DlinkDriver`] is the one implementation
/// in this crate, but the getters are expressed as a trait so callers
/// can stay vendor-agnostic.
#[async_trait]
pub trait NetworkDriver: Send {
    /// Open the connection to the device and prepare the session
    /// (login dialog where the transport needs one, pager disarmed).
    async fn open(&mut self) -> Result<()>;

    /// Close the connection, undoing session preparation first.
    async fn close(&mut self) -> Result<()>;

    /// Check whether the session is still usable.
    ///
    /// Sends a transport-level probe; `false` for a driver that was
    /// never opened or whose peer has gone away.
    async fn is_alive(&mut self) -> bool;

    /// Execute raw CLI commands and return their responses keyed by
    /// command, in execution order.
    async fn cli(&mut self, commands: &[&str]) -> Result<IndexMap<String, Response>>;

    /// Retrieve structured device facts.
    async fn get_facts(&mut self) -> Result<Facts>;

    /// Retrieve device configuration from the requested stores.
    async fn get_config(&mut self, source: ConfigSource) -> Result<DeviceConfig>;

    /// Retrieve the ARP table.
    async fn get_arp_table(&mut self) -> Result<Vec<ArpEntry>>;

    /// Retrieve the MAC address (forwarding) table.
    async fn get_mac_address_table(&mut self) -> Result<Vec<MacTableEntry>>;
}
