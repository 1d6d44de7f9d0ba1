//! Authentication request and response exchanged with the supplicant.

use std::fmt;

use eapsim_common::EapMethod;
use serde::{Deserialize, Serialize};

use crate::umts::UmtsAuthResult;

/// Challenge forwarded by the supplicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimAuthRequest {
    /// Network the request belongs to
    pub network_id: i32,
    /// EAP method being run
    pub protocol: EapMethod,
    /// SSID of the network
    pub ssid: String,
    /// Up to three RANDs for EAP-SIM; RAND and AUTN for EAP-AKA/AKA'
    pub data: Vec<String>,
}

/// Kind of authentication response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimAuthResponseType {
    /// SRES/Kc records
    GsmAuth,
    /// RES/CK/IK
    UmtsAuth,
    /// AUTS
    UmtsAuts,
}

impl SimAuthResponseType {
    /// Marker the supplicant expects in front of the response.
    pub const fn marker(self) -> &'static str {
        match self {
            SimAuthResponseType::GsmAuth => "GSM-AUTH",
            SimAuthResponseType::UmtsAuth => "UMTS-AUTH",
            SimAuthResponseType::UmtsAuts => "UMTS-AUTS",
        }
    }
}

impl fmt::Display for SimAuthResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Response handed back to the supplicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimAuthResponse {
    /// Response kind
    pub response_type: SimAuthResponseType,
    /// Joined hex fields, each preceded by `:`
    pub response: String,
}

impl SimAuthResponse {
    /// Wraps joined GSM records.
    pub fn gsm(response: String) -> Self {
        Self {
            response_type: SimAuthResponseType::GsmAuth,
            response,
        }
    }
}

impl From<UmtsAuthResult> for SimAuthResponse {
    fn from(result: UmtsAuthResult) -> Self {
        Self {
            response_type: result.response_type(),
            response: result.to_string(),
        }
    }
}

/// Renders `<marker><response>`, e.g. `UMTS-AUTS:aabb`.
impl fmt::Display for SimAuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.response_type, self.response)
    }
}
