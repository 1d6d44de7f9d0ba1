//! Shared types: EAP methods, SIM command parameters, subscriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outer EAP method of a Wi-Fi enterprise configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EapMethod {
    /// No EAP method configured
    #[default]
    None,
    /// Protected EAP
    Peap,
    /// EAP-TLS
    Tls,
    /// EAP-TTLS
    Ttls,
    /// EAP-pwd
    Pwd,
    /// EAP-SIM (RFC 4186)
    Sim,
    /// EAP-AKA (RFC 4187)
    Aka,
    /// EAP-AKA' (RFC 5448)
    AkaPrime,
    /// Unauthenticated TLS
    UnauthTls,
}

impl EapMethod {
    /// Returns the one-character identity prefix for SIM-based methods.
    ///
    /// See RFC 4186 section 4.2.1.6 and RFC 4187 section 4.1.1.6.
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            EapMethod::Aka => Some("0"),
            EapMethod::Sim => Some("1"),
            EapMethod::AkaPrime => Some("6"),
            _ => None,
        }
    }

    /// Returns true for EAP-SIM, EAP-AKA and EAP-AKA'.
    pub const fn is_sim_based(self) -> bool {
        matches!(self, EapMethod::Sim | EapMethod::Aka | EapMethod::AkaPrime)
    }
}

impl fmt::Display for EapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EapMethod::None => "NONE",
            EapMethod::Peap => "PEAP",
            EapMethod::Tls => "TLS",
            EapMethod::Ttls => "TTLS",
            EapMethod::Pwd => "PWD",
            EapMethod::Sim => "SIM",
            EapMethod::Aka => "AKA",
            EapMethod::AkaPrime => "AKA'",
            EapMethod::UnauthTls => "UNAUTH_TLS",
        };
        write!(f, "{name}")
    }
}

/// Inner (phase 2) method of a tunnelled EAP configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase2Method {
    /// No inner method
    #[default]
    None,
    /// PAP
    Pap,
    /// MS-CHAP
    Mschap,
    /// MS-CHAPv2
    Mschapv2,
    /// GTC
    Gtc,
    /// EAP-SIM
    Sim,
    /// EAP-AKA
    Aka,
    /// EAP-AKA'
    AkaPrime,
}

impl Phase2Method {
    /// Returns true for the SIM-based inner methods.
    pub const fn is_sim_based(self) -> bool {
        matches!(
            self,
            Phase2Method::Sim | Phase2Method::Aka | Phase2Method::AkaPrime
        )
    }
}

/// Application on the UICC that executes the authentication command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppType {
    /// 2G SIM application (3GPP TS 11.11)
    Sim,
    /// 3G USIM application (3GPP TS 31.102)
    Usim,
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppType::Sim => write!(f, "SIM"),
            AppType::Usim => write!(f, "USIM"),
        }
    }
}

/// Authentication context requested from the UICC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// GSM context: RAND in, SRES/Kc out
    EapSim,
    /// UMTS context: RAND/AUTN in, RES/CK/IK or AUTS out
    EapAka,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::EapSim => write!(f, "EAP-SIM"),
            AuthType::EapAka => write!(f, "EAP-AKA"),
        }
    }
}

/// Identifier of an active cellular subscription.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubscriptionId(pub i32);

impl SubscriptionId {
    /// Sentinel used by platforms for "no subscription".
    pub const INVALID: SubscriptionId = SubscriptionId(-1);

    /// Returns true if this id can refer to an active subscription.
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscriber data read from the SIM of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriberInfo {
    /// IMSI, empty when unavailable
    pub imsi: String,
    /// Operator numeric (MCC followed by MNC), empty when unavailable
    pub mcc_mnc: String,
    /// Whether the SIM reports the READY state
    pub sim_ready: bool,
}

impl SubscriberInfo {
    /// Creates subscriber info for a ready SIM.
    pub fn ready(imsi: impl Into<String>, mcc_mnc: impl Into<String>) -> Self {
        Self {
            imsi: imsi.into(),
            mcc_mnc: mcc_mnc.into(),
            sim_ready: true,
        }
    }

    /// Returns the operator string only when the SIM is ready.
    pub fn operator(&self) -> Option<&str> {
        if self.sim_ready && !self.mcc_mnc.is_empty() {
            Some(&self.mcc_mnc)
        } else {
            None
        }
    }
}
