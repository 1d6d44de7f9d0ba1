//! UMTS authentication context (EAP-AKA, EAP-AKA')
//!
//! The command data is `[len][RAND][len][AUTN]` (3GPP TS 31.102 7.1.2.1).
//! The response starts with a tag byte:
//! - `0xDB` successful execution: `[len][RES][len][CK][len][IK]`
//! - `0xDC` synchronization failure: `[len][AUTS]`

use std::fmt;

use bytes::Buf;
use eapsim_common::{
    base64_encode, concat, length_prefixed_hex_to_bytes, log_sim_exchange, AppType, AuthType,
    Direction, OctetString,
};
use tracing::{debug, warn};

use crate::command::{read_length_prefixed, response_bytes, SimCommand};
use crate::error::{AuthError, AuthResult};
use crate::response::SimAuthResponseType;

/// Leading tag of a UMTS authentication response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UmtsTag {
    /// Successful 3G authentication
    Success = 0xDB,
    /// Synchronization failure
    SyncFailure = 0xDC,
}

impl TryFrom<u8> for UmtsTag {
    type Error = AuthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0xDB => Ok(UmtsTag::Success),
            0xDC => Ok(UmtsTag::SyncFailure),
            _ => Err(AuthError::UnknownTag(value)),
        }
    }
}

/// Outcome of a UMTS authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UmtsAuthResult {
    /// The network was authenticated
    Success {
        /// Response
        res: OctetString,
        /// Cipher key
        ck: OctetString,
        /// Integrity key
        ik: OctetString,
    },
    /// The USIM detected a sequence number mismatch
    SyncFailure {
        /// Re-synchronization token
        auts: OctetString,
    },
}

impl UmtsAuthResult {
    /// Response type reported to the supplicant.
    pub fn response_type(&self) -> SimAuthResponseType {
        match self {
            UmtsAuthResult::Success { .. } => SimAuthResponseType::UmtsAuth,
            UmtsAuthResult::SyncFailure { .. } => SimAuthResponseType::UmtsAuts,
        }
    }
}

/// Renders `:ik:ck:res` or `:auts`.
impl fmt::Display for UmtsAuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UmtsAuthResult::Success { res, ck, ik } => write!(f, ":{ik}:{ck}:{res}"),
            UmtsAuthResult::SyncFailure { auts } => write!(f, ":{auts}"),
        }
    }
}

/// Decodes a tagged UMTS response.
///
/// Every nested length is checked against the remaining buffer, the same
/// way the GSM path checks SRES and Kc.
pub fn decode_umts_response(data: &[u8]) -> AuthResult<UmtsAuthResult> {
    let mut buf = data;
    if !buf.has_remaining() {
        return Err(AuthError::ResponseTooShort { len: 0 });
    }

    let result = match UmtsTag::try_from(buf.get_u8())? {
        UmtsTag::Success => {
            let res = read_length_prefixed(&mut buf, "RES")?;
            let ck = read_length_prefixed(&mut buf, "CK")?;
            let ik = read_length_prefixed(&mut buf, "IK")?;
            UmtsAuthResult::Success { res, ck, ik }
        }
        UmtsTag::SyncFailure => {
            let auts = read_length_prefixed(&mut buf, "AUTS")?;
            UmtsAuthResult::SyncFailure { auts }
        }
    };

    if buf.has_remaining() {
        debug!(trailing = buf.remaining(), "Ignoring trailing bytes in UMTS response");
    }
    Ok(result)
}

/// Runs a UMTS authentication for `[RAND, AUTN]` hex strings.
///
/// Strings are decoded as given, so surrounding whitespace is malformed hex,
/// the same rule the GSM batches apply.
pub fn umts_auth_response<C, S>(sim: &C, challenge: &[S]) -> AuthResult<UmtsAuthResult>
where
    C: SimCommand + ?Sized,
    S: AsRef<str>,
{
    let [rand, autn] = challenge else {
        return Err(AuthError::ChallengeCount {
            expected: 2,
            actual: challenge.len(),
        });
    };
    let rand = length_prefixed_hex_to_bytes(rand.as_ref())
        .map_err(|e| AuthError::MalformedChallenge(e.to_string()))?;
    let autn = length_prefixed_hex_to_bytes(autn.as_ref())
        .map_err(|e| AuthError::MalformedChallenge(e.to_string()))?;

    let request = concat(&rand, &autn);
    log_sim_exchange(Direction::ToSim, "UMTS RAND/AUTN", &request);
    let response = sim.icc_authentication(AppType::Usim, AuthType::EapAka, &base64_encode(&request));

    let data = response_bytes(response.as_deref()).map_err(|e| {
        warn!("UMTS authentication failed: {}", e);
        e
    })?;
    log_sim_exchange(Direction::FromSim, "UMTS response", &data);

    decode_umts_response(&data).map_err(|e| {
        warn!("Invalid UMTS response: {}", e);
        e
    })
}
