//! Server text encoding
//!
//! Encoding only matters at the socket boundary: requests are encoded just
//! before the write and response bursts are decoded right after the read.
//! Everything above the client works on `str`.

use std::fmt;
use std::str::FromStr;

use crate::error::{FrogError, Result};

/// Text encoding spoken by the server.
///
/// Frog and Tadpole deployments use UTF-8 or Latin-1; both are decoded
/// strictly, invalid bytes are an error rather than replacement characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| FrogError::Decoding(format!("invalid utf-8 at byte {}", e.valid_up_to()))),
            // Latin-1 maps each byte to the code point of the same value.
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(c as u32)
                        .map_err(|_| FrogError::Decoding(format!("{c:?} is not representable in latin-1")))
                })
                .collect(),
        }
    }
}

impl FromStr for Encoding {
    type Err = FrogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(FrogError::Decoding(format!("unsupported encoding: {other}"))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "latin-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_roundtrip() {
        let enc = Encoding::Utf8;
        let bytes = enc.encode("Dit is één test.").unwrap();
        assert_eq!(enc.decode(&bytes).unwrap(), "Dit is één test.");
    }

    #[test]
    fn test_utf8_invalid_bytes_fail() {
        let err = Encoding::Utf8.decode(&[0x44, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, FrogError::Decoding(_)));
    }

    #[test]
    fn test_latin1_decode_never_fails() {
        let text = Encoding::Latin1.decode(&[0x44, 0xe9, 0x0a]).unwrap();
        assert_eq!(text, "Dé\n");
    }

    #[test]
    fn test_latin1_encode_rejects_wide_chars() {
        let err = Encoding::Latin1.encode("日本語").unwrap_err();
        assert!(matches!(err, FrogError::Decoding(_)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("iso-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("koi8-r".parse::<Encoding>().is_err());
    }
}
