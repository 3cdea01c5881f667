//! ANSI escape sequence stripping.
//!
//! Switch CLIs decorate their output with cursor movement and erase
//! sequences, especially around the pager. Prompt patterns must run
//! against clean text, so everything except printable characters and
//! plain line controls is dropped before buffering.

use vte::{Params, Parser, Perform};

/// Strip ANSI/CSI/OSC escape sequences from raw terminal output.
///
/// Printable characters and CR/LF/TAB survive; escape sequences and
/// other C0 controls do not.
pub fn strip_ansi(data: &[u8]) -> Vec<u8> {
    let mut parser = Parser::new();
    let mut stripper = Stripper {
        out: Vec::with_capacity(data.len()),
    };
    parser.advance(&mut stripper, data);
    stripper.out
}

struct Stripper {
    out: Vec<u8>,
}

impl Perform for Stripper {
    fn print(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\r' | b'\n' | b'\t') {
            self.out.push(byte);
        }
    }

    fn hook(&mut self, _: &Params, _: &[u8], _: bool, _: char) {}
    fn put(&mut self, _: u8) {}
    fn unhook(&mut self) {}
    fn osc_dispatch(&mut self, _: &[&[u8]], _: bool) {}
    fn csi_dispatch(&mut self, _: &Params, _: &[u8], _: bool, _: char) {}
    fn esc_dispatch(&mut self, _: &[u8], _: bool, _: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(strip_ansi(b"DES-3528:admin#"), b"DES-3528:admin#");
    }

    #[test]
    fn test_color_codes_removed() {
        assert_eq!(strip_ansi(b"\x1b[32mGreen\x1b[0m text"), b"Green text");
    }

    #[test]
    fn test_erase_line_removed() {
        // The D-Link pager erases its own banner line before printing
        // the next page
        assert_eq!(strip_ansi(b"\x1b[2K\rrow one\r\n"), b"\rrow one\r\n");
    }

    #[test]
    fn test_line_controls_survive() {
        assert_eq!(strip_ansi(b"a\r\n\tb"), b"a\r\n\tb");
    }

    #[test]
    fn test_other_controls_dropped() {
        assert_eq!(strip_ansi(b"a\x07b\x08c"), b"abc");
    }
}
