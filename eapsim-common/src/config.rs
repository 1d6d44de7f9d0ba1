//! Configuration structures for SIM-based EAP authentication
//!
//! This module provides the enterprise network configuration subset the
//! identity builder needs, and per-subscription carrier settings that decide
//! whether identities are prefixed and whether the IMSI must be encrypted.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;
use crate::types::{EapMethod, Phase2Method, SubscriptionId};

/// EAP settings of a Wi-Fi enterprise network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EapConfig {
    /// Outer EAP method
    pub eap_method: EapMethod,
    /// Inner method, only meaningful for tunnelled outer methods
    #[serde(default)]
    pub phase2_method: Phase2Method,
}

impl EapConfig {
    /// Creates an EAP configuration.
    pub const fn new(eap_method: EapMethod, phase2_method: Phase2Method) -> Self {
        Self {
            eap_method,
            phase2_method,
        }
    }

    /// Creates a configuration with only an outer method.
    pub const fn outer(eap_method: EapMethod) -> Self {
        Self::new(eap_method, Phase2Method::None)
    }

    /// Returns true if authentication uses SIM credentials, either directly
    /// or as the inner method of PEAP.
    pub fn is_sim_based(&self) -> bool {
        self.eap_method.is_sim_based()
            || (self.eap_method == EapMethod::Peap && self.phase2_method.is_sim_based())
    }
}

/// Carrier settings for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// The carrier requires the permanent identity to be encrypted over WLAN
    #[serde(default)]
    pub imsi_encryption_required: bool,
    /// The carrier expects the EAP method prefix on anonymous identities
    #[serde(default)]
    pub eap_method_prefix_enabled: bool,
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Carrier settings keyed by subscription
    #[serde(default)]
    pub carriers: BTreeMap<SubscriptionId, CarrierConfig>,
    /// Default log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl ClientConfig {
    /// Returns the carrier settings of a subscription, defaulting to all-off.
    pub fn carrier(&self, sub_id: SubscriptionId) -> CarrierConfig {
        self.carriers.get(&sub_id).copied().unwrap_or_default()
    }

    /// Adds or replaces the carrier settings of a subscription.
    pub fn with_carrier(mut self, sub_id: SubscriptionId, carrier: CarrierConfig) -> Self {
        self.carriers.insert(sub_id, carrier);
        self
    }

    /// Parses a client configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use eapsim_common::config::ClientConfig;
    /// use eapsim_common::types::SubscriptionId;
    ///
    /// let yaml = r#"
    /// log_level: debug
    /// carriers:
    ///   1:
    ///     imsi_encryption_required: true
    ///     eap_method_prefix_enabled: true
    /// "#;
    ///
    /// let config = ClientConfig::from_yaml(yaml).unwrap();
    /// assert!(config.carrier(SubscriptionId(1)).imsi_encryption_required);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a client configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl EapConfig {
    /// Parses an EAP configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
