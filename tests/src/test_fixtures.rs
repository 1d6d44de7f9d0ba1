//! Test fixtures: subscriber data, SIM response buffers and carrier keys.

use std::sync::OnceLock;

use eapsim_common::{concat, SubscriptionId};
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;

/// Subscription used by most scenarios
pub const TEST_SUB: SubscriptionId = SubscriptionId(1);

/// IMSI of MCC 310, MNC 15
pub const TEST_IMSI: &str = "310150123456789";

/// Operator numeric matching [`TEST_IMSI`]
pub const TEST_MCC_MNC: &str = "31015";

/// Realm for [`TEST_MCC_MNC`]
pub const TEST_REALM: &str = "wlan.mnc015.mcc310.3gppnetwork.org";

/// Shared throwaway carrier key, generated once per test binary.
pub fn test_rsa_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 1024).expect("key generation"))
}

fn length_prefixed(field: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.len() + 1);
    out.push(field.len() as u8);
    out.extend_from_slice(field);
    out
}

/// `[len][SRES][len][Kc]`
pub fn gsm_length_prefixed_response(sres: &[u8], kc: &[u8]) -> Vec<u8> {
    concat(&length_prefixed(sres), &length_prefixed(kc))
}

/// `SRES || Kc` without length bytes
pub fn gsm_fixed_response(sres: &[u8; 4], kc: &[u8; 8]) -> Vec<u8> {
    concat(sres, kc)
}

/// `0xDB [len][RES][len][CK][len][IK]`
pub fn umts_success_response(res: &[u8], ck: &[u8], ik: &[u8]) -> Vec<u8> {
    let mut out = vec![0xDB];
    out.extend(length_prefixed(res));
    out.extend(length_prefixed(ck));
    out.extend(length_prefixed(ik));
    out
}

/// `0xDC [len][AUTS]`
pub fn umts_sync_failure_response(auts: &[u8]) -> Vec<u8> {
    let mut out = vec![0xDC];
    out.extend(length_prefixed(auts));
    out
}
