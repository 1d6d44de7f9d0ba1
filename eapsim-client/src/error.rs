//! Client errors

use eapsim_common::SubscriptionId;
use eapsim_identity::IdentityError;
use eapsim_usim::AuthError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The subscription id does not refer to a subscription
    #[error("Invalid subscription: {0}")]
    InvalidSubscription(SubscriptionId),
    /// The SIM is absent or not in the READY state
    #[error("SIM not ready for subscription {0}")]
    SimNotReady(SubscriptionId),
    /// The SIM reports no operator numeric
    #[error("No operator for subscription {0}")]
    MissingOperator(SubscriptionId),
    /// Carrier key material is required but could not be obtained
    #[error("IMSI encryption info unavailable: {0}")]
    EncryptionInfoUnavailable(String),
    /// Identity construction failed
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
    /// SIM authentication failed
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
