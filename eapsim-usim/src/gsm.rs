//! GSM authentication context (EAP-SIM)
//!
//! Two response layouts exist:
//! - length-prefixed (3GPP TS 31.102 7.1.2.1): `[len][SRES][len][Kc]`
//! - fixed (3GPP TS 11.11 9.2.16): 4-byte SRES followed by 8-byte Kc
//!
//! Each non-blank RAND in a batch is authenticated separately and the
//! records are joined as `:kc:sres` in input order.

use std::fmt;

use bytes::Buf;
use eapsim_common::{
    base64_encode, length_prefixed_hex_to_bytes, log_sim_exchange, strip_leading_length_byte,
    AppType, AuthType, CodecResult, Direction, OctetString,
};
use tracing::{debug, warn};

use crate::command::{read_length_prefixed, response_bytes, SimCommand, MIN_RESPONSE_LEN};
use crate::error::{AuthError, AuthResult};

/// SRES length in the fixed layout.
pub const GSM_SRES_LEN: usize = 4;

/// Kc length in the fixed layout.
pub const GSM_KC_LEN: usize = 8;

/// SRES and Kc produced by one RAND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsmAuthRecord {
    /// Ciphering key
    pub kc: OctetString,
    /// Signed response
    pub sres: OctetString,
}

impl fmt::Display for GsmAuthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.kc, self.sres)
    }
}

/// Decodes a length-prefixed `[len][SRES][len][Kc]` response.
///
/// Length bytes are signed octets. Bytes after Kc are ignored.
pub fn decode_gsm_response(data: &[u8]) -> AuthResult<GsmAuthRecord> {
    if data.len() <= MIN_RESPONSE_LEN {
        return Err(AuthError::ResponseTooShort { len: data.len() });
    }
    let mut buf = data;
    let sres = read_length_prefixed(&mut buf, "SRES")?;
    let kc = read_length_prefixed(&mut buf, "Kc")?;
    if buf.has_remaining() {
        debug!(trailing = buf.remaining(), "Ignoring trailing bytes after Kc");
    }
    Ok(GsmAuthRecord { kc, sres })
}

/// Decodes a fixed-layout response of exactly 12 bytes.
pub fn decode_gsm_fixed_response(data: &[u8]) -> AuthResult<GsmAuthRecord> {
    let expected = GSM_SRES_LEN + GSM_KC_LEN;
    if data.len() != expected {
        return Err(AuthError::UnexpectedLength {
            expected,
            actual: data.len(),
        });
    }
    let (sres, kc) = data.split_at(GSM_SRES_LEN);
    Ok(GsmAuthRecord {
        kc: OctetString::from_slice(kc),
        sres: OctetString::from_slice(sres),
    })
}

/// Authenticates each RAND and decodes length-prefixed responses.
///
/// `app_type` selects the application: [`AppType::Usim`] for GSM auth over
/// a USIM, [`AppType::Sim`] for a 2G SIM. Blank and malformed challenges are
/// skipped. Surrounding whitespace makes a challenge malformed. An all-blank
/// batch yields an empty string.
pub fn gsm_auth_response<C, S>(sim: &C, app_type: AppType, challenges: &[S]) -> AuthResult<String>
where
    C: SimCommand + ?Sized,
    S: AsRef<str>,
{
    run_batch(
        sim,
        app_type,
        challenges,
        length_prefixed_hex_to_bytes,
        decode_gsm_response,
    )
}

/// Authenticates each RAND and decodes fixed-layout responses.
///
/// RANDs are sent without the leading length byte.
pub fn gsm_no_length_auth_response<C, S>(
    sim: &C,
    app_type: AppType,
    challenges: &[S],
) -> AuthResult<String>
where
    C: SimCommand + ?Sized,
    S: AsRef<str>,
{
    run_batch(
        sim,
        app_type,
        challenges,
        |hex| length_prefixed_hex_to_bytes(hex).map(|b| strip_leading_length_byte(&b)),
        decode_gsm_fixed_response,
    )
}

fn run_batch<C, S, E, D>(
    sim: &C,
    app_type: AppType,
    challenges: &[S],
    encode: E,
    decode: D,
) -> AuthResult<String>
where
    C: SimCommand + ?Sized,
    S: AsRef<str>,
    E: Fn(&str) -> CodecResult<Vec<u8>>,
    D: Fn(&[u8]) -> AuthResult<GsmAuthRecord>,
{
    let mut joined = String::new();

    for (index, challenge) in challenges.iter().enumerate() {
        let challenge = challenge.as_ref();
        if challenge.trim().is_empty() {
            continue;
        }
        let rand = match encode(challenge) {
            Ok(rand) => rand,
            Err(e) => {
                warn!(index, "Skipping malformed challenge: {}", e);
                continue;
            }
        };

        log_sim_exchange(Direction::ToSim, "GSM RAND", &rand);
        let response = sim.icc_authentication(app_type, AuthType::EapSim, &base64_encode(&rand));
        let data = response_bytes(response.as_deref()).map_err(|e| {
            warn!(index, %app_type, "GSM authentication failed: {}", e);
            e
        })?;
        log_sim_exchange(Direction::FromSim, "GSM response", &data);

        let record = decode(&data).map_err(|e| {
            warn!(index, %app_type, "Invalid GSM response: {}", e);
            e
        })?;
        joined.push_str(&record.to_string());
    }

    Ok(joined)
}
