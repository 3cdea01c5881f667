//! `show fdb` (MAC address table) output parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize_mac;

static FDB_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<vid>\d+)\s+
        (?P<vlan>\S+)\s+
        (?P<mac>(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2})\s+
        (?P<port>\S+)\s+
        (?P<type>\w+)\s+
        (?P<status>\w+)",
    )
    .unwrap()
});

/// One row of the switch forwarding database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacTableEntry {
    /// VLAN ID.
    pub vid: u16,

    /// VLAN name.
    pub vlan_name: String,

    /// Learned MAC address, normalized.
    pub mac: String,

    /// Port the address was learned on. A string because stacked units
    /// print `unit:port`.
    pub port: String,

    /// Entry type: `Dynamic`, `Static`, `Self`, ...
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Forwarding status, normally `Forward`.
    pub status: String,
}

/// Parse `show fdb` output into MAC table entries.
pub fn parse_mac_table(output: &str) -> Vec<MacTableEntry> {
    output
        .lines()
        .filter_map(|line| {
            let caps = FDB_ROW.captures(line.trim_start())?;
            let vid: u16 = caps["vid"].parse().ok()?;
            Some(MacTableEntry {
                vid,
                vlan_name: caps["vlan"].to_string(),
                mac: normalize_mac(&caps["mac"]),
                port: caps["port"].to_string(),
                entry_type: caps["type"].to_string(),
                status: caps["status"].to_string(),
            })
        })
        .collect()
}
