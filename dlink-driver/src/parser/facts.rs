//! `show switch` output parsing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::normalize_mac;
use super::uptime::parse_uptime;

/// Structured device facts.
///
/// The typed fields cover the usual inventory vocabulary (vendor,
/// model, OS version, serial, uptime); `attributes` keeps the complete
/// `show switch` table in device order, since models differ wildly in
/// which rows they print.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Facts {
    /// Always "D-Link".
    pub vendor: String,

    /// Device model, from `Device Type` (e.g. "DES-3528 Fast Ethernet Switch").
    pub model: String,

    /// System MAC address, normalized.
    pub mac_address: String,

    /// Firmware version, the closest thing the platform has to an OS version.
    pub os_version: String,

    /// Boot PROM version.
    pub boot_version: String,

    /// Hardware revision.
    pub hardware_version: String,

    /// Serial number.
    pub serial_number: String,

    /// Configured system name; often empty on factory-default devices.
    pub hostname: String,

    /// Uptime in seconds, when the device reported a parseable uptime.
    pub uptime: Option<u64>,

    /// Every `key : value` row of the output, in device order.
    pub attributes: IndexMap<String, String>,
}

/// Parse `show switch` output into [`Facts`].
///
/// Rows are `key : value` pairs split on the first colon; rows without
/// a colon (separators, banner fragments) are skipped.
pub fn parse_facts(output: &str) -> Facts {
    let mut attributes = IndexMap::new();

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        attributes.insert(key.to_string(), value.trim().to_string());
    }

    let field = |name: &str| attributes.get(name).cloned().unwrap_or_default();

    let model = field("Device Type");
    let os_version = field("Firmware Version");
    let boot_version = field("Boot PROM Version");
    let hardware_version = field("Hardware Version");
    let serial_number = field("Serial Number");
    let hostname = field("System Name");

    let mac_address = {
        let raw = field("MAC Address");
        if raw.is_empty() { raw } else { normalize_mac(&raw) }
    };

    // Key name varies across DES/DGS firmware lines
    let uptime = attributes
        .get("System Uptime")
        .or_else(|| attributes.get("Device Uptime"))
        .and_then(|raw| parse_uptime(raw).ok());

    Facts {
        vendor: "D-Link".to_string(),
        model,
        mac_address,
        os_version,
        boot_version,
        hardware_version,
        serial_number,
        hostname,
        uptime,
        attributes,
    }
}
