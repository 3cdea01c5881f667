//! Uptime string parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

const HOUR_SECONDS: u64 = 3600;
const DAY_SECONDS: u64 = 24 * HOUR_SECONDS;
const WEEK_SECONDS: u64 = 7 * DAY_SECONDS;
const YEAR_SECONDS: u64 = 365 * DAY_SECONDS;

static UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(year|week|day|hour|min|sec)").unwrap());

/// Parse a D-Link uptime string into seconds.
///
/// The device prints uptime as a comma-separated list of units, e.g.
/// `3 days, 4 hours, 21 minutes, 52 seconds`, with years and weeks
/// appearing on long-lived installs. Units that are absent count as
/// zero; a string with no recognizable unit at all is an error.
pub fn parse_uptime(uptime_str: &str) -> Result<u64, ParseError> {
    let mut total: u64 = 0;
    let mut matched = false;

    for caps in UNIT.captures_iter(uptime_str) {
        let amount: u64 = caps[1].parse().map_err(|_| {
            ParseError::Uptime(uptime_str.to_string())
        })?;
        let unit = caps[2].to_ascii_lowercase();

        total += match unit.as_str() {
            "year" => amount * YEAR_SECONDS,
            "week" => amount * WEEK_SECONDS,
            "day" => amount * DAY_SECONDS,
            "hour" => amount * HOUR_SECONDS,
            "min" => amount * 60,
            "sec" => amount,
            _ => unreachable!("unit alternatives are fixed by the regex"),
        };
        matched = true;
    }

    if !matched {
        return Err(ParseError::Uptime(uptime_str.to_string()));
    }

    Ok(total)
}
