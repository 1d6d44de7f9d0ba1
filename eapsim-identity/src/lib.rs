//! EAP identity construction for SIM-based methods
//!
//! Builds the identities a Wi-Fi client presents during EAP-SIM, EAP-AKA and
//! EAP-AKA' authentication:
//! - permanent identity `prefix | IMSI @ realm` (RFC 4186 4.2.1.6, RFC 4187 4.1.1.6)
//! - encrypted permanent identity `\0 | Base64(RSA-OAEP(identity)) {, key id}`
//! - anonymous identity `{prefix} anonymous @ realm`
//! - realm-decorated pseudonyms
//!
//! The realm is the 3GPP NAI realm of TS 23.003:
//! `wlan.mnc<MNC>.mcc<MCC>.3gppnetwork.org`.

pub mod error;
pub mod identity;
pub mod realm;

pub use error::{IdentityError, IdentityResult};
pub use identity::{
    build_anonymous_identity, build_encrypted_identity, build_identity, decorate_pseudonym,
    is_anonymous_at_realm, sim_eap_method_for, SimIdentity, ANONYMOUS_IDENTITY,
    ENCRYPTED_IDENTITY_PREFIX,
};
pub use realm::{build_realm, split_mcc_mnc, THREE_GPP_REALM_SUFFIX};
