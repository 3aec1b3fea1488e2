//! Frog protocol client.
//!
//! One [`FrogClient`] owns one TCP connection and runs one request/response
//! exchange at a time. The protocol is strictly sequential, so `process`
//! takes `&mut self`; overlapping requests on a shared session are ruled
//! out at compile time, and independent sessions are fully parallel.

pub mod frame;
pub mod parser;

use std::io::{self, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::align::align;
use crate::encoding::Encoding;
use crate::error::{FrogError, Result};
use crate::record::{Record, RecordShape};

use frame::{io_to_frog, FrameReader};
use parser::RecordParser;

/// Receive chunk size.
const BUFFER_SIZE: usize = 4096;

/// End-of-transmission marker appended to requests unless the peer is an
/// old Frog/Tadpole server that predates it.
const EOT_MARKER: &[u8] = b"EOT\r\n";

/// Connection settings, fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub server_encoding: Encoding,
    /// Record width the session produces; mirrors the server's `returnall`
    /// setting and is never inferred from individual response lines.
    pub shape: RecordShape,
    /// Old servers do not understand the `EOT` end-of-transmission marker.
    pub legacy_frog: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 12345,
            timeout: Duration::from_secs(120),
            server_encoding: Encoding::Utf8,
            shape: RecordShape::Extended,
            legacy_frog: false,
        }
    }
}

/// A session with a Frog or Tadpole server.
#[derive(Debug)]
pub struct FrogClient {
    stream: TcpStream,
    config: ClientConfig,
    /// Cleared after a connection-level failure; the protocol has no resync
    /// point mid-stream, so the session refuses further exchanges.
    healthy: bool,
}

impl FrogClient {
    /// Opens a blocking connection; the configured timeout bounds both the
    /// connect and every subsequent socket operation.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let mut last_err: Option<io::Error> = None;
        let mut stream = None;
        for addr in (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(FrogError::Connection)?
        {
            match TcpStream::connect_timeout(&addr, config.timeout) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }
        let stream = match stream {
            Some(s) => s,
            None => {
                return Err(match last_err {
                    Some(e) => io_to_frog(e),
                    None => FrogError::Connection(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("{} resolved to no addresses", config.host),
                    )),
                })
            }
        };
        stream
            .set_read_timeout(Some(config.timeout))
            .map_err(FrogError::Connection)?;
        stream
            .set_write_timeout(Some(config.timeout))
            .map_err(FrogError::Connection)?;
        debug!(host = %config.host, port = config.port, "connected");
        Ok(Self {
            stream,
            config,
            healthy: true,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one line of text and returns the full output sequence: one
    /// entry per server token, plus a [`Record::Boundary`] at the start of
    /// every sentence after the first.
    pub fn process(&mut self, text: &str) -> Result<Vec<Record>> {
        if !self.healthy {
            return Err(FrogError::SessionPoisoned);
        }
        let result = self.exchange(text);
        if let Err(e) = &result {
            if e.is_fatal() {
                warn!(error = %e, "session poisoned");
                self.healthy = false;
            }
        }
        result
    }

    /// Pre-tokenized variant: words are joined with single spaces before
    /// transmission.
    pub fn process_tokens<S: AsRef<str>>(&mut self, words: &[S]) -> Result<Vec<Record>> {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        self.process(&joined)
    }

    /// Like [`process`](Self::process), but re-keyed to the caller's own
    /// tokenization: yields exactly one record per space-separated input
    /// word, substituting [`Record::Boundary`] where the greedy aligner
    /// finds no corresponding server token.
    pub fn process_aligned(&mut self, text: &str) -> Result<Aligned> {
        let output = self.process(text)?;
        let input_words: Vec<&str> = normalize(text).split(' ').collect();
        let alignment = align(&input_words, &output);
        Ok(Aligned {
            output,
            alignment,
            next: 0,
        })
    }

    /// Shuts the connection down. Idempotent; also runs on drop.
    pub fn close(&mut self) {
        self.healthy = false;
        // NotConnected after an earlier close is fine.
        let _ = self.stream.shutdown(Shutdown::Both);
    }

    fn exchange(&mut self, text: &str) -> Result<Vec<Record>> {
        let input = normalize(text);
        let mut payload = self.config.server_encoding.encode(input)?;
        payload.extend_from_slice(b"\r\n");
        if !self.config.legacy_frog {
            payload.extend_from_slice(EOT_MARKER);
        }
        // write_all retries partial sends until done or the socket fails.
        self.stream.write_all(&payload).map_err(io_to_frog)?;
        trace!(bytes = payload.len(), "request sent");

        let mut reader = FrameReader::new(&mut self.stream, self.config.server_encoding, BUFFER_SIZE);
        let mut parser = RecordParser::new(self.config.shape);
        loop {
            let burst = reader.read_burst()?;
            if parser.feed(&burst)? {
                break;
            }
        }
        debug!(records = parser.len(), "frame complete");
        Ok(parser.into_records())
    }
}

impl Drop for FrogClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// Strips the surrounding whitespace the protocol is sensitive to; the
/// request terminator supplies the only newline the server should see.
fn normalize(text: &str) -> &str {
    text.trim_matches([' ', '\t', '\n', '\r'])
}

/// Aligned view over one exchange, realized lazily: one record per input
/// word, in input order.
pub struct Aligned {
    output: Vec<Record>,
    alignment: Vec<Option<usize>>,
    next: usize,
}

impl Aligned {
    /// The verdicts backing this view, one per input word.
    pub fn alignment(&self) -> &[Option<usize>] {
        &self.alignment
    }

    /// The untranslated output sequence.
    pub fn records(&self) -> &[Record] {
        &self.output
    }
}

impl Iterator for Aligned {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let verdict = *self.alignment.get(self.next)?;
        self.next += 1;
        Some(match verdict {
            Some(index) => self.output[index].clone(),
            None => Record::Boundary,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.alignment.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Aligned {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_edges_only() {
        assert_eq!(normalize("  Dit is een test .\r\n"), "Dit is een test .");
        assert_eq!(normalize("a  b"), "a  b");
    }

    #[test]
    fn test_default_config_values() {
        let config = ClientConfig::default();
        assert_eq!(config.port, 12345);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.shape, RecordShape::Extended);
        assert!(!config.legacy_frog);
    }

    #[test]
    fn test_aligned_iterator_substitutes_boundaries() {
        let aligned = Aligned {
            output: vec![Record::Boundary],
            alignment: vec![None, Some(0)],
            next: 0,
        };
        let records: Vec<Record> = aligned.collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Record::is_boundary));
    }
}
