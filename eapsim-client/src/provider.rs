//! Telephony seam.

use eapsim_common::{AppType, AuthType, SubscriberInfo, SubscriptionId};
use eapsim_crypto::ImsiEncryptionInfo;
use eapsim_usim::SimCommand;

/// Platform telephony services for one device.
pub trait TelephonyProvider {
    /// Returns the subscriber data of an active subscription, or `None` when
    /// no SIM backs it.
    fn subscriber_info(&self, sub_id: SubscriptionId) -> Option<SubscriberInfo>;

    /// Returns the carrier key for WLAN IMSI encryption.
    ///
    /// `Ok(None)` means the carrier provisioned no key. `Err` carries the
    /// platform failure.
    fn imsi_encryption_info(
        &self,
        sub_id: SubscriptionId,
    ) -> Result<Option<ImsiEncryptionInfo>, String>;

    /// Runs the AUTHENTICATE command on the SIM of `sub_id`.
    fn icc_authentication(
        &self,
        sub_id: SubscriptionId,
        app_type: AppType,
        auth_type: AuthType,
        challenge: &str,
    ) -> Option<String>;
}

/// Binds a provider to one subscription so it can drive the SIM directly.
pub struct SubscriptionSim<'a, P: ?Sized> {
    provider: &'a P,
    sub_id: SubscriptionId,
}

impl<'a, P: TelephonyProvider + ?Sized> SubscriptionSim<'a, P> {
    /// Creates a SIM handle for `sub_id`.
    pub fn new(provider: &'a P, sub_id: SubscriptionId) -> Self {
        Self { provider, sub_id }
    }
}

impl<P: TelephonyProvider + ?Sized> SimCommand for SubscriptionSim<'_, P> {
    fn icc_authentication(
        &self,
        app_type: AppType,
        auth_type: AuthType,
        challenge: &str,
    ) -> Option<String> {
        self.provider
            .icc_authentication(self.sub_id, app_type, auth_type, challenge)
    }
}
