//! Parsers turning raw CLI output into structured data.
//!
//! These are pure functions over text: no I/O, no panics on odd input.
//! Rows that do not match the expected shape are skipped, matching how
//! operators read the same screens past their headers and separators.

mod arp;
mod facts;
mod fdb;
mod uptime;

pub use arp::{ArpEntry, parse_arp_table};
pub use facts::{Facts, parse_facts};
pub use fdb::{MacTableEntry, parse_mac_table};
pub use uptime::parse_uptime;

/// Normalize a MAC address to uppercase dash-separated form, the way
/// D-Link prints it (`00-1F-9D-48-72-51`).
pub(crate) fn normalize_mac(raw: &str) -> String {
    raw.to_ascii_uppercase().replace(':', "-")
}
