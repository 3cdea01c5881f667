//! Telnet transport over a plain TCP stream.
//!
//! Implements just enough of the Telnet NVT (RFC 854) to hold a CLI
//! session: option negotiation is answered (and declined, except for
//! the server echoing and suppressing go-ahead), IAC sequences are
//! stripped from the data stream, and lines go out with CRLF endings.
//!
//! Telnet has no protocol-level authentication; the driver layer runs
//! the device's `UserName:`/`PassWord:` login dialog over this stream.

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::Transport;
use super::config::{ConnectConfig, TransportKind};
use crate::error::{Result, TransportError};

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;
const NOP: u8 = 241;

const OPT_ECHO: u8 = 1;
const OPT_SUPPRESS_GO_AHEAD: u8 = 3;

/// Telnet transport for switches with SSH disabled.
pub struct TelnetTransport {
    stream: TcpStream,
    nvt: NvtParser,
    closed: bool,
}

impl TelnetTransport {
    /// Connect to the device's Telnet service.
    pub async fn connect(config: &ConnectConfig) -> Result<Self> {
        let port = config.port_for(TransportKind::Telnet);

        let stream = tokio::time::timeout(
            config.timeout,
            TcpStream::connect((config.host.as_str(), port)),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|e| TransportError::ConnectionFailed {
            host: config.host.clone(),
            port,
            source: e,
        })?;

        // Command/response exchanges are tiny; don't let Nagle batch them
        let _ = stream.set_nodelay(true);

        debug!("telnet session established to {}:{}", config.host, port);

        Ok(Self {
            stream,
            nvt: NvtParser::new(),
            closed: false,
        })
    }
}

#[async_trait]
impl Transport for TelnetTransport {
    async fn read(&mut self) -> Result<Bytes> {
        loop {
            let mut chunk = [0u8; 4096];
            let n = self
                .stream
                .read(&mut chunk)
                .await
                .map_err(TransportError::Io)?;
            if n == 0 {
                self.closed = true;
                return Err(TransportError::Disconnected.into());
            }

            let mut data = Vec::with_capacity(n);
            let mut replies = Vec::new();
            self.nvt.process(&chunk[..n], &mut data, &mut replies);

            if !replies.is_empty() {
                debug!("answering {} bytes of telnet negotiation", replies.len());
                self.stream
                    .write_all(&replies)
                    .await
                    .map_err(TransportError::Io)?;
            }

            // A chunk can be pure negotiation; keep reading until the
            // device says something
            if !data.is_empty() {
                return Ok(Bytes::from(data));
            }
        }
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .await
            .map_err(TransportError::Io)?;
        Ok(())
    }

    async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut out = Vec::with_capacity(line.len() + 2);
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(b"\r\n");
        self.write(&out).await
    }

    async fn probe(&mut self) -> Result<()> {
        // IAC NOP: a no-op the device must swallow, proving the TCP
        // session still accepts writes
        self.write(&[IAC, NOP]).await
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.stream.shutdown().await.map_err(TransportError::Io)?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NvtState {
    Data,
    Command,
    Negotiate(u8),
    Subnegotiation,
    SubnegotiationCommand,
}

/// Incremental IAC stream parser.
///
/// State survives across chunks, so a negotiation sequence split over
/// two TCP reads is still handled correctly.
#[derive(Debug)]
struct NvtParser {
    state: NvtState,
}

impl NvtParser {
    fn new() -> Self {
        Self {
            state: NvtState::Data,
        }
    }

    /// Separate `input` into application data and negotiation replies.
    fn process(&mut self, input: &[u8], data: &mut Vec<u8>, replies: &mut Vec<u8>) {
        let mut i = 0;
        while i < input.len() {
            match self.state {
                NvtState::Data => match memchr::memchr(IAC, &input[i..]) {
                    Some(off) => {
                        data.extend_from_slice(&input[i..i + off]);
                        i += off + 1;
                        self.state = NvtState::Command;
                    }
                    None => {
                        data.extend_from_slice(&input[i..]);
                        i = input.len();
                    }
                },
                NvtState::Command => {
                    let cmd = input[i];
                    i += 1;
                    match cmd {
                        // IAC IAC escapes a literal 0xFF data byte
                        IAC => {
                            data.push(IAC);
                            self.state = NvtState::Data;
                        }
                        DO | DONT | WILL | WONT => {
                            self.state = NvtState::Negotiate(cmd);
                        }
                        SB => {
                            self.state = NvtState::Subnegotiation;
                        }
                        // NOP, GA and friends carry no payload
                        _ => {
                            self.state = NvtState::Data;
                        }
                    }
                }
                NvtState::Negotiate(cmd) => {
                    let opt = input[i];
                    i += 1;
                    match cmd {
                        // We offer no options ourselves
                        DO => replies.extend_from_slice(&[IAC, WONT, opt]),
                        WILL => {
                            if opt == OPT_ECHO || opt == OPT_SUPPRESS_GO_AHEAD {
                                replies.extend_from_slice(&[IAC, DO, opt]);
                            } else {
                                replies.extend_from_slice(&[IAC, DONT, opt]);
                            }
                        }
                        // DONT/WONT acknowledge the state we are already in
                        _ => {}
                    }
                    self.state = NvtState::Data;
                }
                NvtState::Subnegotiation => match memchr::memchr(IAC, &input[i..]) {
                    Some(off) => {
                        i += off + 1;
                        self.state = NvtState::SubnegotiationCommand;
                    }
                    None => {
                        i = input.len();
                    }
                },
                NvtState::SubnegotiationCommand => {
                    let cmd = input[i];
                    i += 1;
                    self.state = if cmd == SE {
                        NvtState::Data
                    } else {
                        NvtState::Subnegotiation
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(parser: &mut NvtParser, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut data = Vec::new();
        let mut replies = Vec::new();
        parser.process(input, &mut data, &mut replies);
        (data, replies)
    }

    #[test]
    fn test_plain_data_passthrough() {
        let mut parser = NvtParser::new();
        let (data, replies) = run(&mut parser, b"DES-3528:admin#");
        assert_eq!(data, b"DES-3528:admin#");
        assert!(replies.is_empty());
    }

    #[test]
    fn test_do_is_refused() {
        let mut parser = NvtParser::new();
        let (data, replies) = run(&mut parser, &[IAC, DO, 24]);
        assert!(data.is_empty());
        assert_eq!(replies, vec![IAC, WONT, 24]);
    }

    #[test]
    fn test_will_echo_accepted() {
        let mut parser = NvtParser::new();
        let (_, replies) = run(&mut parser, &[IAC, WILL, OPT_ECHO]);
        assert_eq!(replies, vec![IAC, DO, OPT_ECHO]);
    }

    #[test]
    fn test_will_other_refused() {
        let mut parser = NvtParser::new();
        let (_, replies) = run(&mut parser, &[IAC, WILL, 31]);
        assert_eq!(replies, vec![IAC, DONT, 31]);
    }

    #[test]
    fn test_escaped_iac_is_data() {
        let mut parser = NvtParser::new();
        let (data, replies) = run(&mut parser, &[b'a', IAC, IAC, b'b']);
        assert_eq!(data, vec![b'a', IAC, b'b']);
        assert!(replies.is_empty());
    }

    #[test]
    fn test_nop_dropped() {
        let mut parser = NvtParser::new();
        let (data, replies) = run(&mut parser, &[b'x', IAC, NOP, b'y']);
        assert_eq!(data, b"xy");
        assert!(replies.is_empty());
    }

    #[test]
    fn test_subnegotiation_dropped() {
        let mut parser = NvtParser::new();
        let (data, _) = run(
            &mut parser,
            &[b'a', IAC, SB, 24, 0, b'v', b't', IAC, SE, b'b'],
        );
        assert_eq!(data, b"ab");
    }

    #[test]
    fn test_sequence_split_across_chunks() {
        let mut parser = NvtParser::new();
        let (data, replies) = run(&mut parser, &[b'a', IAC]);
        assert_eq!(data, b"a");
        assert!(replies.is_empty());

        let (data, replies) = run(&mut parser, &[DO]);
        assert!(data.is_empty());
        assert!(replies.is_empty());

        let (data, replies) = run(&mut parser, &[24, b'b']);
        assert_eq!(data, b"b");
        assert_eq!(replies, vec![IAC, WONT, 24]);
    }
}
