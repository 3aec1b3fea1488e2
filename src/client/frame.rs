//! Frame reading.
//!
//! The server answers in bursts: one or more `\n`-terminated lines per
//! read sequence, repeated until a `READY` sentinel line closes the frame.
//! This module only handles the byte level, accumulating a single burst and
//! decoding it; the sentinel itself is recognized by the record parser.

use std::io::{self, Read};

use tracing::trace;

use crate::encoding::Encoding;
use crate::error::{FrogError, Result};

/// Reads newline-terminated bursts from a byte stream.
///
/// Generic over [`Read`] so tests can drive it from in-memory scripts.
pub struct FrameReader<R> {
    stream: R,
    encoding: Encoding,
    chunk_size: usize,
}

impl<R: Read> FrameReader<R> {
    pub fn new(stream: R, encoding: Encoding, chunk_size: usize) -> Self {
        Self {
            stream,
            encoding,
            chunk_size,
        }
    }

    /// Accumulates reads until the buffer ends in a newline, then decodes.
    ///
    /// A zero-byte read before any data arrives means the peer closed the
    /// connection cleanly ([`FrogError::ConnectionClosed`]); a zero-byte
    /// read with a partial line buffered means the stream died mid-burst
    /// ([`FrogError::ProtocolViolation`]).
    pub fn read_burst(&mut self) -> Result<String> {
        let mut data = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];
        while data.last() != Some(&b'\n') {
            let n = self.stream.read(&mut chunk).map_err(io_to_frog)?;
            if n == 0 {
                if data.is_empty() {
                    return Err(FrogError::ConnectionClosed);
                }
                return Err(FrogError::ProtocolViolation(
                    "stream closed mid-burst, no trailing newline".into(),
                ));
            }
            data.extend_from_slice(&chunk[..n]);
        }
        trace!(bytes = data.len(), "burst received");
        self.encoding.decode(&data)
    }
}

/// Blocking reads signal an expired timeout through the error kind.
pub(crate) fn io_to_frog(err: io::Error) -> FrogError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => FrogError::Timeout,
        _ => FrogError::Connection(err),
    }
}
