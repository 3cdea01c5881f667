//! Device profile: prompt, pager and failure patterns.
//!
//! D-Link managed switches (DES/DGS series) present prompts of the form
//! `DES-3528:admin#` or `DGS-3100-24>` depending on firmware and login
//! level, page long output through a `CTRL+C ESC q Quit SPACE n Next
//! Page ...` banner, and control that pager with the `clipaging`
//! command pair. All of that lives here so the driver stays free of
//! literal strings, and so the odd firmware with different prompts can
//! be handled by overriding the profile on the builder.

use regex::bytes::Regex;

use crate::channel::compile_prompt_pattern;
use crate::error::{ChannelError, Result};

/// Command prompt at the end of idle output, admin (`#`) or user (`>`)
/// level, with or without the `:user` suffix.
const PROMPT_PATTERN: &str = r"(?:^|\n)[\w.\-]+(?::[\w.\-]+)?[#>] ?$";

/// Telnet login dialog prompts. Firmware varies between `UserName:`
/// and `login:`, and between `PassWord:` and `Password:`.
const USERNAME_PROMPT_PATTERN: &str = r"(?i)(?:user ?name|login)\s*: ?$";
const PASSWORD_PROMPT_PATTERN: &str = r"(?i)pass ?word\s*: ?$";

/// The pager banner. Matched anywhere in the tail since the device
/// parks on it mid-listing.
const PAGER_PATTERN: &str = r"(?i)next page|ctrl\+c";

/// Vendor-specific session profile.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    /// Pattern matching the idle command prompt.
    pub prompt_pattern: Regex,

    /// Pattern matching the username prompt of the login dialog.
    pub username_prompt: Regex,

    /// Pattern matching the password prompt of the login dialog.
    pub password_prompt: Regex,

    /// Pattern matching the output pager banner.
    pub pager_prompt: Regex,

    /// Key sent to quit the pager (no line ending).
    pub pager_quit: String,

    /// Substrings that indicate command failure.
    pub failed_when_contains: Vec<String>,

    /// Command whose output doubles as the facts source and the paging
    /// probe.
    pub probe_command: String,

    /// Command that turns the CLI pager off for the session.
    pub disable_paging_command: String,

    /// Command that turns the CLI pager back on.
    pub restore_paging_command: String,
}

impl DeviceProfile {
    /// The stock D-Link DES/DGS profile.
    pub fn dlink() -> Self {
        Self {
            prompt_pattern: Regex::new(PROMPT_PATTERN).unwrap(),
            username_prompt: Regex::new(USERNAME_PROMPT_PATTERN).unwrap(),
            password_prompt: Regex::new(PASSWORD_PROMPT_PATTERN).unwrap(),
            pager_prompt: Regex::new(PAGER_PATTERN).unwrap(),
            pager_quit: "q".to_string(),
            failed_when_contains: vec![
                "Invalid command".to_string(),
                "Next possible completions:".to_string(),
                "Available commands:".to_string(),
            ],
            probe_command: "show switch".to_string(),
            disable_paging_command: "disable clipaging".to_string(),
            restore_paging_command: "enable clipaging".to_string(),
        }
    }

    /// Replace the prompt pattern. An end-of-input anchor is added when
    /// the pattern does not carry one.
    pub fn with_prompt(mut self, pattern: &str) -> Result<Self> {
        self.prompt_pattern =
            compile_prompt_pattern(pattern).map_err(ChannelError::InvalidPattern)?;
        Ok(self)
    }

    /// Add a failure substring.
    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    /// Check normalized command output for failure indications.
    pub fn detect_failure(&self, output: &str) -> Option<String> {
        self.failed_when_contains
            .iter()
            .find(|needle| output.contains(needle.as_str()))
            .cloned()
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::dlink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_prompt_matches() {
        let profile = DeviceProfile::dlink();
        assert!(profile.prompt_pattern.is_match(b"DES-3528:admin#"));
        assert!(profile.prompt_pattern.is_match(b"DES-3528:admin# "));
        assert!(profile.prompt_pattern.is_match(b"banner text\r\nDGS-3627G:4#"));
    }

    #[test]
    fn test_user_prompt_matches() {
        let profile = DeviceProfile::dlink();
        assert!(profile.prompt_pattern.is_match(b"DGS-3100-24>"));
        assert!(profile.prompt_pattern.is_match(b"output\nDGS-1210-28> "));
    }

    #[test]
    fn test_prompt_only_matches_at_end() {
        let profile = DeviceProfile::dlink();
        // A prompt-looking line mid-listing must not terminate a read
        assert!(
            !profile
                .prompt_pattern
                .is_match(b"DES-3528:admin#\r\nmore output still coming")
        );
    }

    #[test]
    fn test_login_prompts() {
        let profile = DeviceProfile::dlink();
        assert!(profile.username_prompt.is_match(b"\r\nUserName:"));
        assert!(profile.username_prompt.is_match(b"login: "));
        assert!(profile.password_prompt.is_match(b"PassWord:"));
        assert!(profile.password_prompt.is_match(b"Password: "));
        assert!(!profile.username_prompt.is_match(b"UserName:admin"));
    }

    #[test]
    fn test_pager_banner_matches() {
        let profile = DeviceProfile::dlink();
        let banner = b"CTRL+C ESC q Quit SPACE n Next Page ENTER Next Entry a All";
        assert!(profile.pager_prompt.is_match(banner));
    }

    #[test]
    fn test_detect_failure() {
        let profile = DeviceProfile::dlink();
        assert_eq!(
            profile.detect_failure("Available commands:\n..  ?  clear config"),
            Some("Available commands:".to_string())
        );
        assert!(profile.detect_failure("Device Type : DES-3528").is_none());
    }

    #[test]
    fn test_custom_prompt_override() {
        let profile = DeviceProfile::dlink().with_prompt(r"switch\$").unwrap();
        assert!(profile.prompt_pattern.is_match(b"switch$"));
        assert!(!profile.prompt_pattern.is_match(b"DES-3528:admin#"));
    }
}
