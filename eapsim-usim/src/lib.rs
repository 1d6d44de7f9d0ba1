//! SIM/USIM authentication for SIM-based EAP methods
//!
//! Submits RAND (and AUTN) challenges to the SIM card through the
//! [`SimCommand`] capability and decodes the raw responses:
//!
//! - [`gsm`] - GSM context (EAP-SIM): SRES/Kc, in the length-prefixed layout
//!   of 3GPP TS 31.102 7.1.2.1 or the fixed 12-byte layout of TS 11.11 9.2.16
//! - [`umts`] - UMTS context (EAP-AKA/AKA'): RES/CK/IK on success (tag 0xDB)
//!   or AUTS on synchronization failure (tag 0xDC)
//!
//! Any inconsistency in a response buffer fails the whole call with an
//! [`AuthError`]; there are no partially decoded results.

pub mod command;
pub mod error;
pub mod gsm;
pub mod response;
pub mod umts;

pub use command::{response_bytes, SimCommand, MIN_RESPONSE_LEN};
pub use error::{AuthError, AuthResult};
pub use gsm::{
    decode_gsm_fixed_response, decode_gsm_response, gsm_auth_response,
    gsm_no_length_auth_response, GsmAuthRecord, GSM_KC_LEN, GSM_SRES_LEN,
};
pub use response::{SimAuthRequest, SimAuthResponse, SimAuthResponseType};
pub use umts::{decode_umts_response, umts_auth_response, UmtsAuthResult, UmtsTag};
