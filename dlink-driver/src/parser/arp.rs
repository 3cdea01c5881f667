//! `show arpentry` output parsing.

use std::net::Ipv4Addr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize_mac;

static ARP_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<interface>\w+)\s+
        (?P<ip>\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\s+
        (?P<mac>(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2})\s+
        (?P<type>\w+(?:/\w+)*)",
    )
    .unwrap()
});

/// One row of the device ARP table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArpEntry {
    /// IP interface the entry was learned on (usually `System`).
    pub interface: String,

    /// Resolved IPv4 address.
    pub ip: Ipv4Addr,

    /// MAC address, normalized.
    pub mac: String,

    /// Entry type as printed: `Dynamic`, `Static`, `Local`,
    /// `Local/Broadcast`, ...
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// Parse `show arpentry` output into ARP entries.
///
/// Header, separator and total-count lines do not match the row shape
/// and are skipped.
pub fn parse_arp_table(output: &str) -> Vec<ArpEntry> {
    output
        .lines()
        .filter_map(|line| {
            let caps = ARP_ROW.captures(line.trim_start())?;
            let ip: Ipv4Addr = caps["ip"].parse().ok()?;
            Some(ArpEntry {
                interface: caps["interface"].to_string(),
                ip,
                mac: normalize_mac(&caps["mac"]),
                entry_type: caps["type"].to_string(),
            })
        })
        .collect()
}
