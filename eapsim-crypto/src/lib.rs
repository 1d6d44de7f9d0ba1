//! Cryptographic support for eapsim
//!
//! Implements carrier-keyed protection of the permanent identity:
//! - RSA-OAEP with SHA-256 and MGF1-SHA-256 (carrier IMSI encryption for WLAN)
//! - Carrier public key and key identifier handling

pub mod imsi;

pub use imsi::{
    CryptoError, CryptoResult, IdentityEncryptor, ImsiEncryptionInfo, RsaOaepEncryptor,
    IMSI_CIPHER_TRANSFORMATION,
};
