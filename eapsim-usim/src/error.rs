//! Authentication errors

use thiserror::Error;

/// Reasons a SIM authentication exchange is rejected.
///
/// Every variant means the attempt cannot proceed; callers must not fall
/// back to a default response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The SIM returned no response
    #[error("No response from SIM")]
    MissingResponse,
    /// The response is too short to hold any authentication data
    #[error("Response too short: {len} bytes")]
    ResponseTooShort {
        /// Length of the response
        len: usize,
    },
    /// The response is not valid base64
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// A length byte is negative when read as a signed octet
    #[error("Negative {field} length: {value}")]
    NegativeLength {
        /// Field the length byte belongs to
        field: &'static str,
        /// Signed length value
        value: i8,
    },
    /// A length byte points past the end of the response
    #[error("Buffer too short for {field}: expected {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Field being read
        field: &'static str,
        /// Bytes needed
        expected: usize,
        /// Bytes available
        actual: usize,
    },
    /// A fixed-layout response has the wrong size
    #[error("Unexpected response length: expected {expected} bytes, got {actual}")]
    UnexpectedLength {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// The UMTS response starts with an unrecognized tag
    #[error("Unknown response tag: 0x{0:02X}")]
    UnknownTag(u8),
    /// A UMTS challenge component is not valid hex
    #[error("Malformed challenge: {0}")]
    MalformedChallenge(String),
    /// The UMTS challenge does not consist of RAND and AUTN
    #[error("Wrong challenge count: expected {expected}, got {actual}")]
    ChallengeCount {
        /// Required number of challenge strings
        expected: usize,
        /// Number supplied
        actual: usize,
    },
}

impl AuthError {
    /// Returns true when the error stems from the SIM response rather than
    /// from the challenge supplied by the caller.
    pub fn is_response_error(&self) -> bool {
        !matches!(
            self,
            AuthError::MalformedChallenge(_) | AuthError::ChallengeCount { .. }
        )
    }
}

/// Result type for SIM authentication
pub type AuthResult<T> = Result<T, AuthError>;
