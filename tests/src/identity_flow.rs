//! Identity flow integration tests
//!
//! Tests permanent, encrypted, anonymous and pseudonym identities through
//! the client with a mock telephony provider.

use std::sync::Arc;

use eapsim_client::{ClientError, SimAuthClient};
use eapsim_common::{
    base64_decode, CarrierConfig, ClientConfig, EapConfig, EapMethod, Phase2Method,
    SubscriberInfo, SubscriptionId,
};
use eapsim_crypto::{ImsiEncryptionInfo, RsaOaepEncryptor};
use eapsim_identity::{is_anonymous_at_realm, ENCRYPTED_IDENTITY_PREFIX};
use integration_tests::{
    init_test_logging, test_rsa_key, FixedEncryptor, MockSubscription, MockTelephony, TEST_IMSI,
    TEST_MCC_MNC, TEST_REALM, TEST_SUB,
};
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;

fn carrier_key(key_id: Option<&str>) -> ImsiEncryptionInfo {
    ImsiEncryptionInfo::new(
        RsaPublicKey::from(test_rsa_key()),
        key_id.map(str::to_string),
    )
}

fn client_with(sub: MockSubscription, carrier: CarrierConfig) -> SimAuthClient<MockTelephony> {
    let telephony = MockTelephony::new().with_subscription(TEST_SUB, sub);
    let config = ClientConfig::default().with_carrier(TEST_SUB, carrier);
    SimAuthClient::new(telephony, Box::new(RsaOaepEncryptor), config)
}

/// Test the permanent identity for each SIM-based method
#[test]
fn test_permanent_identity_per_method() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC),
        CarrierConfig::default(),
    );

    for (method, prefix) in [
        (EapMethod::Sim, '1'),
        (EapMethod::Aka, '0'),
        (EapMethod::AkaPrime, '6'),
    ] {
        let identity = client
            .sim_identity(TEST_SUB, &EapConfig::outer(method))
            .unwrap();
        assert_eq!(
            identity.identity,
            format!("{prefix}{TEST_IMSI}@{TEST_REALM}")
        );
        assert!(identity.encrypted_identity.is_none());
    }
}

/// Test that PEAP with an inner SIM method uses the inner prefix
#[test]
fn test_peap_inner_method_identity() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC),
        CarrierConfig::default(),
    );
    let identity = client
        .sim_identity(TEST_SUB, &EapConfig::new(EapMethod::Peap, Phase2Method::Sim))
        .unwrap();
    assert_eq!(identity.identity, format!("1{TEST_IMSI}@{TEST_REALM}"));

    let result = client.sim_identity(
        TEST_SUB,
        &EapConfig::new(EapMethod::Peap, Phase2Method::Mschapv2),
    );
    assert!(matches!(result, Err(ClientError::Identity(_))));
}

/// Test that the encrypted identity decrypts back to the permanent identity
#[test]
fn test_encrypted_identity_round_trip() {
    init_test_logging();

    let sub = MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC)
        .with_encryption_info(carrier_key(Some("key=1")));
    let client = client_with(sub, CarrierConfig::default());

    let identity = client
        .sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Aka))
        .unwrap();
    let encrypted = identity.encrypted_identity.clone().unwrap();
    assert_eq!(identity.preferred(), encrypted);

    let body = encrypted.strip_prefix(ENCRYPTED_IDENTITY_PREFIX).unwrap();
    let (b64, key_id) = body.split_once(',').unwrap();
    assert_eq!(key_id, "key=1");

    let ciphertext = base64_decode(b64).unwrap();
    assert_eq!(ciphertext.len(), 128);
    let plaintext = test_rsa_key()
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .unwrap();
    assert_eq!(plaintext, identity.identity.as_bytes());
}

/// Test the encrypted identity layout with a deterministic encryptor
#[test]
fn test_encrypted_identity_layout() {
    init_test_logging();

    let encryptor = Arc::new(FixedEncryptor::new(&[0xDE, 0xAD, 0xBE, 0xEF]));
    let sub = MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC)
        .with_encryption_info(carrier_key(None));
    let telephony = MockTelephony::new().with_subscription(TEST_SUB, sub);
    let client = SimAuthClient::new(telephony, Box::new(encryptor.clone()), ClientConfig::default());

    let identity = client
        .sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim))
        .unwrap();
    assert_eq!(identity.encrypted_identity.as_deref(), Some("\03q2+7w=="));
    assert_eq!(encryptor.calls(), 1);
}

/// Test that a required but missing carrier key aborts identity construction
#[test]
fn test_required_encryption_without_key() {
    init_test_logging();

    let carrier = CarrierConfig {
        imsi_encryption_required: true,
        eap_method_prefix_enabled: false,
    };
    let client = client_with(MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC), carrier);

    assert!(client.requires_imsi_encryption(TEST_SUB));
    assert!(!client.is_imsi_encryption_info_available(TEST_SUB));
    assert!(matches!(
        client.sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::EncryptionInfoUnavailable(_))
    ));
}

/// Test that a provider failure fetching the key aborts identity construction
#[test]
fn test_encryption_info_failure() {
    init_test_logging();

    let mut sub = MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC);
    sub.encryption_error = Some("carrier key download failed".to_string());
    let client = client_with(sub, CarrierConfig::default());

    assert_eq!(
        client.sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::EncryptionInfoUnavailable(
            "carrier key download failed".to_string()
        ))
    );
}

/// Test that no identity is built while the SIM is not ready
#[test]
fn test_identity_without_ready_sim() {
    init_test_logging();

    let sub = MockSubscription {
        info: SubscriberInfo {
            imsi: "234150999999999".to_string(),
            mcc_mnc: "23415".to_string(),
            sim_ready: false,
        },
        ..Default::default()
    };
    let client = client_with(sub, CarrierConfig::default());

    assert_eq!(
        client.sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::SimNotReady(TEST_SUB))
    );
    assert_eq!(
        client.anonymous_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::SimNotReady(TEST_SUB))
    );
}

/// Test the IMSI-derived realm for a ready SIM that reports no operator
#[test]
fn test_identity_without_operator() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready("234150999999999", ""),
        CarrierConfig::default(),
    );
    let identity = client
        .sim_identity(TEST_SUB, &EapConfig::outer(EapMethod::Sim))
        .unwrap();
    assert_eq!(
        identity.identity,
        "1234150999999999@wlan.mnc150.mcc234.3gppnetwork.org"
    );
}

/// Test anonymous identities with and without the method prefix
#[test]
fn test_anonymous_identity() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready(TEST_IMSI, "310410"),
        CarrierConfig::default(),
    );
    let anonymous = client
        .anonymous_identity(TEST_SUB, &EapConfig::outer(EapMethod::AkaPrime))
        .unwrap();
    assert_eq!(anonymous, "anonymous@wlan.mnc410.mcc310.3gppnetwork.org");
    assert!(is_anonymous_at_realm(&anonymous));

    let carrier = CarrierConfig {
        imsi_encryption_required: false,
        eap_method_prefix_enabled: true,
    };
    let client = client_with(MockSubscription::ready(TEST_IMSI, "310410"), carrier);
    let anonymous = client
        .anonymous_identity(TEST_SUB, &EapConfig::outer(EapMethod::AkaPrime))
        .unwrap();
    assert_eq!(anonymous, "6anonymous@wlan.mnc410.mcc310.3gppnetwork.org");
    assert!(is_anonymous_at_realm(&anonymous));
}

/// Test identities for a subscription with no SIM
#[test]
fn test_unknown_subscription() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC),
        CarrierConfig::default(),
    );
    let other = SubscriptionId(5);
    assert_eq!(
        client.sim_identity(other, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::SimNotReady(other))
    );
    assert_eq!(
        client.anonymous_identity(other, &EapConfig::outer(EapMethod::Sim)),
        Err(ClientError::SimNotReady(other))
    );
    assert_eq!(
        client.decorate_pseudonym(other, "pseudo"),
        Err(ClientError::SimNotReady(other))
    );
    assert_eq!(
        client.decorate_pseudonym(other, "pseudo@realm"),
        Ok(Some("pseudo@realm".to_string()))
    );
}

/// Test pseudonym decoration from the live operator
#[test]
fn test_pseudonym_decoration() {
    init_test_logging();

    let client = client_with(
        MockSubscription::ready(TEST_IMSI, TEST_MCC_MNC),
        CarrierConfig::default(),
    );
    assert_eq!(
        client.decorate_pseudonym(TEST_SUB, "4ZfPq1"),
        Ok(Some(format!("4ZfPq1@{TEST_REALM}")))
    );
    assert_eq!(client.decorate_pseudonym(TEST_SUB, ""), Ok(None));
}
