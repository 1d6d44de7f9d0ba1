//! 3GPP NAI realm derivation (3GPP TS 23.003 section 14).

use crate::error::{IdentityError, IdentityResult};

/// Domain under which every 3GPP WLAN realm lives.
pub const THREE_GPP_REALM_SUFFIX: &str = "3gppnetwork.org";

/// Builds `wlan.mnc<MNC>.mcc<MCC>.3gppnetwork.org`.
///
/// A 2-digit MNC is left-padded with a zero. Any other length is passed
/// through unchanged.
///
/// ```
/// use eapsim_identity::build_realm;
///
/// assert_eq!(build_realm("310", "12"), "wlan.mnc012.mcc310.3gppnetwork.org");
/// assert_eq!(build_realm("310", "410"), "wlan.mnc410.mcc310.3gppnetwork.org");
/// ```
pub fn build_realm(mcc: &str, mnc: &str) -> String {
    if mnc.len() == 2 {
        format!("wlan.mnc0{mnc}.mcc{mcc}.{THREE_GPP_REALM_SUFFIX}")
    } else {
        format!("wlan.mnc{mnc}.mcc{mcc}.{THREE_GPP_REALM_SUFFIX}")
    }
}

/// Splits an operator numeric string into MCC (first 3 characters) and MNC
/// (the remainder).
pub fn split_mcc_mnc(mcc_mnc: &str) -> IdentityResult<(&str, &str)> {
    match (mcc_mnc.get(..3), mcc_mnc.get(3..)) {
        (Some(mcc), Some(mnc)) => Ok((mcc, mnc)),
        _ => Err(IdentityError::MalformedMccMnc(mcc_mnc.to_string())),
    }
}
