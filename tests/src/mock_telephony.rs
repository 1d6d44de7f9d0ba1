//! Mock telephony provider backed by [`MockSim`] cards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use eapsim_client::TelephonyProvider;
use eapsim_common::{AppType, AuthType, SubscriberInfo, SubscriptionId};
use eapsim_crypto::{CryptoResult, IdentityEncryptor, ImsiEncryptionInfo};
use eapsim_usim::SimCommand;
use rsa::RsaPublicKey;

use crate::mock_sim::MockSim;

/// One active subscription.
#[derive(Debug, Default)]
pub struct MockSubscription {
    pub info: SubscriberInfo,
    pub encryption_info: Option<ImsiEncryptionInfo>,
    /// Failure reported instead of the encryption info
    pub encryption_error: Option<String>,
    pub sim: MockSim,
}

impl MockSubscription {
    pub fn ready(imsi: &str, mcc_mnc: &str) -> Self {
        Self {
            info: SubscriberInfo::ready(imsi, mcc_mnc),
            ..Default::default()
        }
    }

    pub fn with_sim(mut self, sim: MockSim) -> Self {
        self.sim = sim;
        self
    }

    pub fn with_encryption_info(mut self, info: ImsiEncryptionInfo) -> Self {
        self.encryption_info = Some(info);
        self
    }
}

/// Device with any number of subscriptions.
#[derive(Debug, Default)]
pub struct MockTelephony {
    subscriptions: HashMap<SubscriptionId, MockSubscription>,
}

impl MockTelephony {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscription(mut self, sub_id: SubscriptionId, sub: MockSubscription) -> Self {
        self.subscriptions.insert(sub_id, sub);
        self
    }

    /// SIM of a subscription, for inspecting recorded commands.
    pub fn sim(&self, sub_id: SubscriptionId) -> Option<&MockSim> {
        self.subscriptions.get(&sub_id).map(|s| &s.sim)
    }
}

impl TelephonyProvider for MockTelephony {
    fn subscriber_info(&self, sub_id: SubscriptionId) -> Option<SubscriberInfo> {
        self.subscriptions.get(&sub_id).map(|s| s.info.clone())
    }

    fn imsi_encryption_info(
        &self,
        sub_id: SubscriptionId,
    ) -> Result<Option<ImsiEncryptionInfo>, String> {
        match self.subscriptions.get(&sub_id) {
            Some(sub) => match &sub.encryption_error {
                Some(e) => Err(e.clone()),
                None => Ok(sub.encryption_info.clone()),
            },
            None => Ok(None),
        }
    }

    fn icc_authentication(
        &self,
        sub_id: SubscriptionId,
        app_type: AppType,
        auth_type: AuthType,
        challenge: &str,
    ) -> Option<String> {
        self.subscriptions
            .get(&sub_id)?
            .sim
            .icc_authentication(app_type, auth_type, challenge)
    }
}

/// Encryptor returning a fixed ciphertext and counting calls.
#[derive(Debug)]
pub struct FixedEncryptor {
    ciphertext: Vec<u8>,
    calls: AtomicUsize,
}

impl FixedEncryptor {
    pub fn new(ciphertext: &[u8]) -> Self {
        Self {
            ciphertext: ciphertext.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityEncryptor for FixedEncryptor {
    fn encrypt(&self, _key: &RsaPublicKey, _plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ciphertext.clone())
    }
}
