//! SIM-based EAP client
//!
//! [`SimAuthClient`] ties identity construction and SIM authentication to a
//! [`TelephonyProvider`], which supplies subscriber data, carrier key
//! material and access to the UICC for a resolved subscription.

pub mod client;
pub mod error;
pub mod provider;

pub use client::SimAuthClient;
pub use error::{ClientError, ClientResult};
pub use provider::{SubscriptionSim, TelephonyProvider};
