//! # dlink-driver
//!
//! Async SSH/Telnet CLI driver for D-Link switch automation.
//!
//! The crate speaks to D-Link managed switches (DES/DGS series) over
//! their terminal CLI and exposes the vendor-neutral read operations
//! network-automation frameworks standardize on: device facts, ARP and
//! MAC tables, configuration retrieval, and raw CLI access.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, or Telnet for switches with SSH
//!   disabled
//! - Prompt-driven command exchange with tail-limited pattern search
//! - Automatic CLI pager (`clipaging`) handling, restored on close
//! - Screen-scraping parsers for `show switch`, `show arpentry` and
//!   `show fdb`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dlink_driver::{DriverBuilder, NetworkDriver, TransportKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dlink_driver::Error> {
//!     let mut driver = DriverBuilder::new("10.90.90.90")
//!         .username("admin")
//!         .password("secret")
//!         .transport(TransportKind::Telnet)
//!         .build()?;
//!
//!     driver.open().await?;
//!
//!     let facts = driver.get_facts().await?;
//!     println!("{} running {}", facts.model, facts.os_version);
//!
//!     driver.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod parser;
pub mod profile;
pub mod transport;

// Re-export main types for convenience
pub use driver::{
    ConfigSource, DeviceConfig, DlinkDriver, DriverBuilder, NetworkDriver, Response,
};
pub use error::Error;
pub use parser::{ArpEntry, Facts, MacTableEntry};
pub use profile::DeviceProfile;
pub use transport::{AuthMethod, ConnectConfig, TransportKind};
