//! IMSI encryption for SIM-based EAP identities
//!
//! Carriers that do not want the IMSI sent in clear over WLAN provision an
//! RSA public key (and optionally a key identifier) on the SIM. The permanent
//! identity is then encrypted with RSA-OAEP before being sent to the server.
//!
//! The encryption itself is an injected capability ([`IdentityEncryptor`]) so
//! identity construction can be exercised without real key material.

use std::sync::Arc;

use rand::rngs::OsRng;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

/// Cipher transformation applied to the permanent identity.
pub const IMSI_CIPHER_TRANSFORMATION: &str = "RSA/ECB/OAEPwithSHA-256andMGF1Padding";

/// IMSI encryption error types
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The carrier public key could not be parsed
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    /// The encryption primitive failed
    #[error("Encryption failed: {0}")]
    Encryption(String),
}

/// Result type for IMSI encryption operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Carrier key material for IMSI encryption.
#[derive(Debug, Clone, PartialEq)]
pub struct ImsiEncryptionInfo {
    /// Carrier RSA public key
    pub public_key: RsaPublicKey,
    /// Key identifier appended to the encrypted identity as an AVP
    pub key_identifier: Option<String>,
}

impl ImsiEncryptionInfo {
    /// Creates encryption info from a parsed key.
    pub fn new(public_key: RsaPublicKey, key_identifier: Option<String>) -> Self {
        Self {
            public_key,
            key_identifier,
        }
    }

    /// Parses a DER-encoded SubjectPublicKeyInfo.
    pub fn from_der(der: &[u8], key_identifier: Option<String>) -> CryptoResult<Self> {
        let public_key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(public_key, key_identifier))
    }

    /// Parses a PEM-encoded SubjectPublicKeyInfo.
    pub fn from_pem(pem: &str, key_identifier: Option<String>) -> CryptoResult<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(public_key, key_identifier))
    }
}

/// Public-key encryption primitive used for the permanent identity.
pub trait IdentityEncryptor: Send + Sync {
    /// Encrypts `plaintext` under `key`, returning raw ciphertext.
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;
}

impl<T: IdentityEncryptor + ?Sized> IdentityEncryptor for Arc<T> {
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        (**self).encrypt(key, plaintext)
    }
}

/// RSA-OAEP encryptor using SHA-256 for both the label hash and MGF1.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaOaepEncryptor;

impl IdentityEncryptor for RsaOaepEncryptor {
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let padding = Oaep::new::<Sha256>();
        key.encrypt(&mut OsRng, padding, plaintext).map_err(|e| {
            tracing::error!(transformation = IMSI_CIPHER_TRANSFORMATION, "Encryption failed: {}", e);
            CryptoError::Encryption(e.to_string())
        })
    }
}
