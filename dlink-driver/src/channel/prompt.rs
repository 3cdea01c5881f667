//! Prompt pattern compilation.

use regex::bytes::Regex;

/// Compile a prompt pattern string into a regex.
///
/// Prompts are only valid when the device is idle, i.e. at the very end
/// of the received output, so an end-of-input anchor is added when the
/// pattern does not carry one. Note this is deliberately not a `(?m)`
/// anchor: a line that merely looks like a prompt in the middle of a
/// paged listing must not terminate the read.
pub fn compile_prompt_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let pattern = if pattern.ends_with('$') {
        pattern.to_string()
    } else {
        format!("{pattern}\\s*$")
    };

    Regex::new(&pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_added() {
        let pattern = compile_prompt_pattern(r"admin#").unwrap();
        assert!(pattern.is_match(b"output\nDES-3528:admin#"));
        assert!(pattern.is_match(b"output\nDES-3528:admin# "));
        assert!(!pattern.is_match(b"DES-3528:admin# more output follows"));
    }

    #[test]
    fn test_existing_anchor_kept() {
        let pattern = compile_prompt_pattern(r"admin# ?$").unwrap();
        assert!(pattern.is_match(b"DES-3528:admin#"));
    }
}
