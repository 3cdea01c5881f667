//! Response type for command execution results.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Response from a single CLI command exchange.
///
/// `result` is what callers usually want: the device output with the
/// command echo and the trailing prompt line stripped. `raw_result`
/// keeps the exchange as received for debugging prompt patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The command that was executed.
    pub command: String,

    /// The normalized command output.
    pub result: String,

    /// The raw output before normalization.
    pub raw_result: String,

    /// The prompt that terminated the read.
    pub prompt: String,

    /// Time taken to execute the command.
    pub elapsed: Duration,

    /// Failure indicator matched in the output, if any.
    pub failure_message: Option<String>,
}

impl Response {
    /// Create a new successful response.
    pub fn new(
        command: impl Into<String>,
        result: impl Into<String>,
        raw_result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            result: result.into(),
            raw_result: raw_result.into(),
            prompt: prompt.into(),
            elapsed,
            failure_message: None,
        }
    }

    /// Create a failed response.
    pub fn failed(
        command: impl Into<String>,
        result: impl Into<String>,
        raw_result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
        failure_message: impl Into<String>,
    ) -> Self {
        Self {
            failure_message: Some(failure_message.into()),
            ..Self::new(command, result, raw_result, prompt, elapsed)
        }
    }

    /// Check if the response indicates success.
    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    /// Check if the normalized output contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.result.contains(pattern)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_failure() {
        let ok = Response::new("show switch", "out", "raw", "#", Duration::from_millis(5));
        assert!(ok.is_success());

        let bad = Response::failed(
            "show foo",
            "Available commands:",
            "raw",
            "#",
            Duration::from_millis(5),
            "Available commands:",
        );
        assert!(!bad.is_success());
        assert_eq!(bad.failure_message.as_deref(), Some("Available commands:"));
    }

    #[test]
    fn test_display_shows_normalized_output() {
        let response = Response::new("show switch", "Device Type : DES-3528", "raw", "#",
            Duration::from_millis(5));
        assert_eq!(response.to_string(), "Device Type : DES-3528");
    }
}
