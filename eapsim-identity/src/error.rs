//! Identity construction errors

use eapsim_common::EapMethod;
use thiserror::Error;

/// Reasons an identity cannot be built.
///
/// Every variant aborts the authentication attempt; there is no partial
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The SIM did not report an IMSI
    #[error("No IMSI available")]
    MissingImsi,
    /// The realm had to be derived from an IMSI that is too short
    #[error("IMSI too short to derive MCC/MNC: {len} digits")]
    ImsiTooShort {
        /// Length of the IMSI
        len: usize,
    },
    /// The operator string does not start with a 3-digit MCC
    #[error("Malformed MCC/MNC: {0:?}")]
    MalformedMccMnc(String),
    /// No identity prefix is registered for the method
    #[error("Unsupported EAP method for SIM identity: {0}")]
    UnsupportedMethod(EapMethod),
    /// The encryption primitive failed
    #[error("Identity encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Result type for identity construction
pub type IdentityResult<T> = Result<T, IdentityError>;
