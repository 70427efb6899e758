//! Typed base58 and base64 encodings.
//!
//! [`Base58`] and [`Base64`] wrap the encoded string form of a byte buffer.
//! Construction from untrusted text is unvalidated (URL parameters and
//! storage reads arrive as plain strings); [`Base58::decode`] /
//! [`Base64::decode`] are where validation happens.
//!
//! Both encodings are lossless for all byte values 0-255, including
//! sequences that are not valid UTF-8 text.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors returned when decoding an encoded string back to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The string is not valid standard base64 (RFC 4648, with padding).
    Base64,

    /// The string is not valid base58 (Bitcoin alphabet).
    Base58,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => write!(f, "invalid base64"),
            Self::Base58 => write!(f, "invalid base58"),
        }
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Base64
// ---------------------------------------------------------------------------

/// A base64-encoded byte buffer (RFC 4648 standard alphabet, padded).
///
/// Used only for values kept in local storage -- never placed in a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Base64(String);

impl Base64 {
    /// Encodes raw bytes. Infallible and lossless.
    pub fn encode(bytes: &[u8]) -> Self {
        Self(BASE64_STANDARD.encode(bytes))
    }

    /// Decodes back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        BASE64_STANDARD.decode(&self.0).map_err(|_| DecodeError::Base64)
    }

    /// Returns the encoded string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Base64 {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Base64 {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for Base64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Base58
// ---------------------------------------------------------------------------

/// A base58-encoded byte buffer (Bitcoin alphabet, no padding).
///
/// Used for every binary field placed in a URL, matching the byte-for-byte
/// encoding the wallet applications expect. Leading zero bytes map to
/// leading `1` characters per the standard algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Base58(String);

impl Base58 {
    /// Encodes raw bytes. Infallible and lossless.
    pub fn encode(bytes: &[u8]) -> Self {
        Self(bs58::encode(bytes).into_string())
    }

    /// Decodes back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        bs58::decode(&self.0).into_vec().map_err(|_| DecodeError::Base58)
    }

    /// Returns the encoded string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Base58 {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Base58 {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for Base58 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random byte pattern for round-trip tests.
    fn pattern(len: usize, seed: u8) -> Vec<u8> {
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect()
    }

    #[test]
    fn base64_round_trip_all_lengths() {
        for len in 0..=128 {
            let bytes = pattern(len, 0x5A);
            let encoded = Base64::encode(&bytes);
            assert_eq!(encoded.decode().unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn base58_round_trip_all_lengths() {
        for len in 0..=128 {
            let bytes = pattern(len, 0xC3);
            let encoded = Base58::encode(&bytes);
            assert_eq!(encoded.decode().unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn round_trip_all_zero_and_all_ff() {
        for len in [0usize, 1, 32, 64, 128] {
            for byte in [0x00u8, 0xFF] {
                let bytes = vec![byte; len];
                assert_eq!(Base64::encode(&bytes).decode().unwrap(), bytes);
                assert_eq!(Base58::encode(&bytes).decode().unwrap(), bytes);
            }
        }
    }

    #[test]
    fn base64_known_vector() {
        assert_eq!(Base64::encode(b"hello world").as_str(), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn base58_known_vector() {
        // Leading zero byte becomes a leading '1'.
        assert_eq!(Base58::encode(&[0x00, 0x01, 0x02]).as_str(), "15T");
    }

    #[test]
    fn base64_rejects_invalid_input() {
        assert_eq!(Base64::from("not base64!!").decode(), Err(DecodeError::Base64));
    }

    #[test]
    fn base58_rejects_invalid_input() {
        // '0', 'O', 'I', and 'l' are excluded from the base58 alphabet.
        assert_eq!(Base58::from("0OIl").decode(), Err(DecodeError::Base58));
    }

    #[test]
    fn encodings_are_not_interchangeable() {
        let bytes = pattern(32, 0x11);
        let b64 = Base64::encode(&bytes);
        // The base64 string fed through a base58 decoder either fails or
        // yields different bytes -- never the original buffer.
        match Base58::from(b64.as_str()).decode() {
            Ok(decoded) => assert_ne!(decoded, bytes),
            Err(e) => assert_eq!(e, DecodeError::Base58),
        }
    }

    #[test]
    fn serde_transparent() {
        let encoded = Base64::encode(&[1, 2, 3]);
        let json = serde_json::to_string(&encoded).unwrap();
        assert_eq!(json, "\"AQID\"");
        let back: Base64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, encoded);
    }
}
