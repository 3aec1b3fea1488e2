//! Client library for the Frog/Tadpole NLP server protocol.
//!
//! Frog tokenizes, lemmatizes and tags natural-language text behind a
//! line-based TCP protocol. This crate implements the client half of that
//! wire contract: request framing, streaming response accumulation up to
//! the `READY` sentinel, tab-delimited record parsing, sentence-boundary
//! reconstruction, and greedy alignment of the caller's tokens against the
//! server's re-tokenized output.

pub mod align;
pub mod client;
pub mod encoding;
pub mod error;
pub mod output;
pub mod record;

pub use align::align;
pub use client::{Aligned, ClientConfig, FrogClient};
pub use encoding::Encoding;
pub use error::{FrogError, Result};
pub use output::{keyed_map, to_json, OutputFormat};
pub use record::{Annotations, Record, RecordShape, Token};
