//! SIM authentication client

use eapsim_common::{AppType, ClientConfig, EapConfig, SubscriberInfo, SubscriptionId};
use eapsim_crypto::IdentityEncryptor;
use eapsim_identity::{
    build_anonymous_identity, build_encrypted_identity, build_identity, sim_eap_method_for,
    split_mcc_mnc, SimIdentity,
};
use eapsim_usim::{
    gsm_auth_response, gsm_no_length_auth_response, umts_auth_response, SimAuthRequest,
    SimAuthResponse,
};
use tracing::{debug, error, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::provider::{SubscriptionSim, TelephonyProvider};

/// Builds EAP identities and answers SIM challenges for resolved
/// subscriptions.
///
/// The client holds no mutable state. Calls for the same subscription must
/// still be serialized by the caller because the SIM executes one command
/// at a time.
pub struct SimAuthClient<P> {
    provider: P,
    encryptor: Box<dyn IdentityEncryptor>,
    config: ClientConfig,
}

impl<P: TelephonyProvider> SimAuthClient<P> {
    /// Creates a client.
    pub fn new(provider: P, encryptor: Box<dyn IdentityEncryptor>, config: ClientConfig) -> Self {
        Self {
            provider,
            encryptor,
            config,
        }
    }

    /// Telephony provider backing this client.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the carrier of `sub_id` requires the IMSI to be encrypted.
    pub fn requires_imsi_encryption(&self, sub_id: SubscriptionId) -> bool {
        self.config.carrier(sub_id).imsi_encryption_required
    }

    /// Whether carrier key material can currently be obtained for `sub_id`.
    pub fn is_imsi_encryption_info_available(&self, sub_id: SubscriptionId) -> bool {
        matches!(self.provider.imsi_encryption_info(sub_id), Ok(Some(_)))
    }

    /// Builds the permanent identity and, when the carrier provisioned a
    /// key, its encrypted form.
    ///
    /// Fails with [`ClientError::SimNotReady`] unless the SIM is ready. A
    /// ready SIM without an operator gets a realm derived from the IMSI.
    pub fn sim_identity(
        &self,
        sub_id: SubscriptionId,
        eap_config: &EapConfig,
    ) -> ClientResult<SimIdentity> {
        let subscriber = self.subscriber(sub_id)?;
        if !subscriber.sim_ready {
            warn!(%sub_id, "SIM not ready, no identity can be built");
            return Err(ClientError::SimNotReady(sub_id));
        }
        let mcc_mnc = subscriber.operator().unwrap_or("");
        let method = sim_eap_method_for(eap_config);

        let identity = build_identity(method, &subscriber.imsi, mcc_mnc).map_err(|e| {
            error!(%sub_id, "Failed to build the identity: {}", e);
            e
        })?;

        let encryption_info = self.provider.imsi_encryption_info(sub_id).map_err(|e| {
            error!(%sub_id, "Failed to get IMSI encryption info: {}", e);
            ClientError::EncryptionInfoUnavailable(e)
        })?;

        let Some(encryption_info) = encryption_info else {
            if self.requires_imsi_encryption(sub_id) {
                warn!(%sub_id, "Carrier requires IMSI encryption but no key is provisioned");
                return Err(ClientError::EncryptionInfoUnavailable(format!(
                    "no key for subscription {sub_id}"
                )));
            }
            debug!(%sub_id, %method, "Using clear-text permanent identity");
            return Ok(SimIdentity::clear(identity));
        };

        let encrypted =
            build_encrypted_identity(&identity, &encryption_info, self.encryptor.as_ref())
                .map_err(|e| {
                    error!(%sub_id, "Failed to encrypt the identity: {}", e);
                    e
                })?;
        debug!(%sub_id, %method, "Built encrypted permanent identity");

        Ok(SimIdentity {
            identity,
            encrypted_identity: Some(encrypted),
        })
    }

    /// Builds `[prefix]anonymous@realm` from the live operator.
    ///
    /// The prefix of the outer EAP method is added when the carrier enables
    /// it.
    pub fn anonymous_identity(
        &self,
        sub_id: SubscriptionId,
        eap_config: &EapConfig,
    ) -> ClientResult<String> {
        let subscriber = self.subscriber(sub_id)?;
        let (mcc, mnc) = self.operator(sub_id, &subscriber)?;
        let prefix_enabled = self.config.carrier(sub_id).eap_method_prefix_enabled;
        Ok(build_anonymous_identity(
            eap_config.eap_method,
            mcc,
            mnc,
            prefix_enabled,
        ))
    }

    /// Adds the realm of the live operator to a server-provided pseudonym.
    ///
    /// Returns `Ok(None)` for an empty pseudonym. Pseudonyms that already
    /// carry a realm are returned without consulting the SIM.
    pub fn decorate_pseudonym(
        &self,
        sub_id: SubscriptionId,
        pseudonym: &str,
    ) -> ClientResult<Option<String>> {
        if pseudonym.is_empty() {
            return Ok(None);
        }
        if pseudonym.contains('@') {
            return Ok(Some(pseudonym.to_string()));
        }
        let subscriber = self.subscriber(sub_id)?;
        let (mcc, mnc) = self.operator(sub_id, &subscriber)?;
        Ok(eapsim_identity::decorate_pseudonym(pseudonym, mcc, mnc))
    }

    /// GSM authentication over the USIM application, length-prefixed layout.
    pub fn gsm_auth_response<S: AsRef<str>>(
        &self,
        sub_id: SubscriptionId,
        challenges: &[S],
    ) -> ClientResult<String> {
        let sim = self.sim(sub_id)?;
        Ok(gsm_auth_response(&sim, AppType::Usim, challenges)?)
    }

    /// GSM authentication over the SIM application, length-prefixed layout.
    pub fn gsm_simple_auth_response<S: AsRef<str>>(
        &self,
        sub_id: SubscriptionId,
        challenges: &[S],
    ) -> ClientResult<String> {
        let sim = self.sim(sub_id)?;
        Ok(gsm_auth_response(&sim, AppType::Sim, challenges)?)
    }

    /// GSM authentication over the SIM application, fixed 12-byte layout.
    pub fn gsm_simple_no_length_auth_response<S: AsRef<str>>(
        &self,
        sub_id: SubscriptionId,
        challenges: &[S],
    ) -> ClientResult<String> {
        let sim = self.sim(sub_id)?;
        Ok(gsm_no_length_auth_response(&sim, AppType::Sim, challenges)?)
    }

    /// UMTS authentication for an EAP-AKA/AKA' request carrying RAND and AUTN.
    pub fn umts_auth_response(
        &self,
        sub_id: SubscriptionId,
        request: &SimAuthRequest,
    ) -> ClientResult<SimAuthResponse> {
        let sim = self.sim(sub_id)?;
        let result = umts_auth_response(&sim, request.data.as_slice())?;
        info!(
            %sub_id,
            network_id = request.network_id,
            ssid = %request.ssid,
            "UMTS authentication result: {}",
            result.response_type()
        );
        Ok(result.into())
    }

    fn sim(&self, sub_id: SubscriptionId) -> ClientResult<SubscriptionSim<'_, P>> {
        if !sub_id.is_valid() {
            return Err(ClientError::InvalidSubscription(sub_id));
        }
        Ok(SubscriptionSim::new(&self.provider, sub_id))
    }

    fn subscriber(&self, sub_id: SubscriptionId) -> ClientResult<SubscriberInfo> {
        if !sub_id.is_valid() {
            return Err(ClientError::InvalidSubscription(sub_id));
        }
        self.provider
            .subscriber_info(sub_id)
            .ok_or(ClientError::SimNotReady(sub_id))
    }

    fn operator<'s>(
        &self,
        sub_id: SubscriptionId,
        subscriber: &'s SubscriberInfo,
    ) -> ClientResult<(&'s str, &'s str)> {
        if !subscriber.sim_ready {
            return Err(ClientError::SimNotReady(sub_id));
        }
        if subscriber.mcc_mnc.is_empty() {
            return Err(ClientError::MissingOperator(sub_id));
        }
        Ok(split_mcc_mnc(&subscriber.mcc_mnc)?)
    }
}
