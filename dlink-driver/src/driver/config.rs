//! Configuration retrieval types.

use serde::{Deserialize, Serialize};

/// Which configuration stores to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// All stores.
    #[default]
    All,

    /// The running configuration.
    Running,

    /// The candidate configuration. On D-Link this is the config saved
    /// in NVRAM, which takes effect on the next boot.
    Candidate,

    /// The startup configuration. D-Link has no separate startup store
    /// (NVRAM fills that role), so this always comes back empty.
    Startup,
}

impl ConfigSource {
    pub(crate) fn includes_running(self) -> bool {
        matches!(self, ConfigSource::All | ConfigSource::Running)
    }

    pub(crate) fn includes_candidate(self) -> bool {
        matches!(self, ConfigSource::All | ConfigSource::Candidate)
    }
}

/// Retrieved device configuration. Stores that were not requested, or
/// that the platform does not have, are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Startup configuration (always empty on this platform).
    pub startup: String,

    /// Running configuration.
    pub running: String,

    /// Candidate (NVRAM) configuration.
    pub candidate: String,
}
