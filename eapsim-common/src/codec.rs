//! Hex and Base64 codec for SIM authentication material.
//!
//! Challenges arrive from the EAP server as hex strings and SIM command
//! responses come back base64 encoded. This module converts between those
//! textual forms and raw bytes, including the legacy "length-prefixed hex"
//! layout used by the `[Length][RAND]` SIM authentication command.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

/// Errors produced by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input is not a well-formed hex string
    #[error("Malformed hex: {0}")]
    MalformedHex(String),
    /// A sub-range reaches past the end of the buffer
    #[error("Range {offset}+{count} exceeds buffer length {len}")]
    Range {
        /// Start of the requested range
        offset: usize,
        /// Number of bytes requested
        count: usize,
        /// Actual buffer length
        len: usize,
    },
    /// The input is not valid base64
    #[error("Malformed base64: {0}")]
    MalformedBase64(String),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Decodes a hex string into bytes.
///
/// Digits are accepted in either case. Odd-length input or any non-hex
/// character yields [`CodecError::MalformedHex`].
pub fn hex_to_bytes(hex: &str) -> CodecResult<Vec<u8>> {
    hex::decode(hex).map_err(|e| CodecError::MalformedHex(format!("{hex:?}: {e}")))
}

/// Decodes a hex string and prepends a synthetic length byte.
///
/// Byte 0 of the result is `hex.len() / 2` truncated to a single byte, the
/// remaining bytes are the decoded payload:
///
/// ```
/// use eapsim_common::codec::length_prefixed_hex_to_bytes;
///
/// assert_eq!(length_prefixed_hex_to_bytes("a1b2").unwrap(), vec![0x02, 0xa1, 0xb2]);
/// assert_eq!(length_prefixed_hex_to_bytes("").unwrap(), vec![0x00]);
/// ```
pub fn length_prefixed_hex_to_bytes(hex: &str) -> CodecResult<Vec<u8>> {
    let payload = hex_to_bytes(hex)?;
    let mut result = Vec::with_capacity(payload.len() + 1);
    result.push((hex.len() / 2) as u8);
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Returns everything after the leading length byte.
///
/// Empty input yields empty output.
pub fn strip_leading_length_byte(bytes: &[u8]) -> Vec<u8> {
    bytes.get(1..).map(<[u8]>::to_vec).unwrap_or_default()
}

/// Encodes bytes as lowercase hex, two digits per byte, no separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Encodes `count` bytes starting at `offset` as lowercase hex.
pub fn bytes_to_hex_range(bytes: &[u8], offset: usize, count: usize) -> CodecResult<String> {
    let range_error = CodecError::Range {
        offset,
        count,
        len: bytes.len(),
    };
    let end = offset.checked_add(count).ok_or_else(|| range_error.clone())?;
    bytes
        .get(offset..end)
        .map(hex::encode)
        .ok_or(range_error)
}

/// Concatenates two buffers.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    result.extend_from_slice(a);
    result.extend_from_slice(b);
    result
}

/// Standard alphabet, decoding with or without trailing `=` padding.
const PADDING_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64-encodes bytes without line wrapping.
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64-decodes text, ignoring embedded ASCII whitespace such as the line
/// breaks some modems insert into long responses. Padding is optional.
pub fn base64_decode(text: &str) -> CodecResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    PADDING_INDIFFERENT
        .decode(compact.as_bytes())
        .map_err(|e| CodecError::MalformedBase64(e.to_string()))
}

/// A variable-length sequence of octets holding authentication material.
///
/// Displays as lowercase hex, which is the form the supplicant expects for
/// SRES, Kc, RES, CK, IK and AUTS values.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct OctetString {
    data: Vec<u8>,
}

impl OctetString {
    /// Creates an `OctetString` from a `Vec<u8>`.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Creates an `OctetString` from a byte slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Returns a reference to the underlying byte slice.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Converts to a lowercase hex string.
    pub fn to_hex_string(&self) -> String {
        bytes_to_hex(&self.data)
    }
}

impl fmt::Debug for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OctetString({})", self.to_hex_string())
    }
}

impl fmt::Display for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for OctetString {
    fn from(data: &[u8]) -> Self {
        Self::from_slice(data)
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
