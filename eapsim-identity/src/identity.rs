//! Permanent, encrypted, anonymous and pseudonym identities.

use eapsim_common::{base64_encode, EapConfig, EapMethod, Phase2Method};
use eapsim_crypto::{IdentityEncryptor, ImsiEncryptionInfo};
use tracing::{trace, warn};

use crate::error::{IdentityError, IdentityResult};
use crate::realm::{build_realm, split_mcc_mnc};

/// Prefix marking an encrypted permanent identity.
pub const ENCRYPTED_IDENTITY_PREFIX: &str = "\0";

/// User part of the anonymous identity.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Identity pair handed to the EAP supplicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimIdentity {
    /// Permanent identity in clear text
    pub identity: String,
    /// Encrypted identity, present only when IMSI encryption is in use
    pub encrypted_identity: Option<String>,
}

impl SimIdentity {
    /// Creates a clear-text only identity.
    pub fn clear(identity: String) -> Self {
        Self {
            identity,
            encrypted_identity: None,
        }
    }

    /// Returns the identity that should be sent first.
    pub fn preferred(&self) -> &str {
        self.encrypted_identity.as_deref().unwrap_or(&self.identity)
    }
}

/// Resolves the SIM-based method a network configuration authenticates with.
///
/// PEAP with a SIM-based inner method resolves to that inner method. Any
/// configuration that is not SIM-based resolves to [`EapMethod::None`].
pub fn sim_eap_method_for(config: &EapConfig) -> EapMethod {
    if !config.is_sim_based() {
        return EapMethod::None;
    }
    if config.eap_method == EapMethod::Peap {
        return match config.phase2_method {
            Phase2Method::Sim => EapMethod::Sim,
            Phase2Method::Aka => EapMethod::Aka,
            Phase2Method::AkaPrime => EapMethod::AkaPrime,
            _ => EapMethod::None,
        };
    }
    config.eap_method
}

/// Builds the permanent identity `<prefix><IMSI>@<realm>`.
///
/// MCC and MNC are taken from `mcc_mnc` when it is non-empty. Otherwise they
/// are read from the IMSI (digits 0..3 and 3..6), which assumes a 3-digit MNC.
pub fn build_identity(method: EapMethod, imsi: &str, mcc_mnc: &str) -> IdentityResult<String> {
    if imsi.is_empty() {
        return Err(IdentityError::MissingImsi);
    }
    let prefix = method
        .prefix()
        .ok_or(IdentityError::UnsupportedMethod(method))?;

    let (mcc, mnc) = if mcc_mnc.is_empty() {
        trace!(len = imsi.len(), "No operator, deriving realm from IMSI");
        match (imsi.get(..3), imsi.get(3..6)) {
            (Some(mcc), Some(mnc)) => (mcc, mnc),
            _ => return Err(IdentityError::ImsiTooShort { len: imsi.len() }),
        }
    } else {
        split_mcc_mnc(mcc_mnc)?
    };

    Ok(format!("{prefix}{imsi}@{}", build_realm(mcc, mnc)))
}

/// Encrypts a permanent identity for transmission.
///
/// Output is `"\0" + Base64(ciphertext)`, followed by `"," + key id` when the
/// carrier provisioned a key identifier.
pub fn build_encrypted_identity(
    identity: &str,
    info: &ImsiEncryptionInfo,
    encryptor: &dyn IdentityEncryptor,
) -> IdentityResult<String> {
    let ciphertext = encryptor
        .encrypt(&info.public_key, identity.as_bytes())
        .map_err(|e| {
            warn!(key_id = ?info.key_identifier, "Identity encryption failed: {}", e);
            IdentityError::EncryptionFailed(e.to_string())
        })?;

    let mut encrypted = format!("{ENCRYPTED_IDENTITY_PREFIX}{}", base64_encode(&ciphertext));
    if let Some(key_id) = &info.key_identifier {
        encrypted.push(',');
        encrypted.push_str(key_id);
    }
    Ok(encrypted)
}

/// Builds `[<prefix>]anonymous@<realm>`.
///
/// The prefix is only added when the carrier enables it and the method has
/// one registered.
pub fn build_anonymous_identity(
    method: EapMethod,
    mcc: &str,
    mnc: &str,
    prefix_enabled: bool,
) -> String {
    let prefix = if prefix_enabled {
        method.prefix().unwrap_or("")
    } else {
        ""
    };
    format!("{prefix}{ANONYMOUS_IDENTITY}@{}", build_realm(mcc, mnc))
}

/// Appends the 3GPP realm to a pseudonym that has none.
///
/// Returns `None` for an empty pseudonym. A pseudonym that already carries a
/// realm is returned unchanged.
pub fn decorate_pseudonym(pseudonym: &str, mcc: &str, mnc: &str) -> Option<String> {
    if pseudonym.is_empty() {
        return None;
    }
    if pseudonym.contains('@') {
        return Some(pseudonym.to_string());
    }
    Some(format!("{pseudonym}@{}", build_realm(mcc, mnc)))
}

/// Returns true for an anonymous identity, with or without a method prefix.
pub fn is_anonymous_at_realm(identity: &str) -> bool {
    let marker = "anonymous@";
    if identity.starts_with(marker) {
        return true;
    }
    let mut chars = identity.chars();
    chars.next().is_some() && chars.as_str().starts_with(marker)
}
