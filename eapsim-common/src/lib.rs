//! Common types and utilities for eapsim
//!
//! This crate provides the hex/base64 codec, shared types, configuration
//! structures, and logging helpers used across all eapsim crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use codec::{
    base64_decode, base64_encode, bytes_to_hex, bytes_to_hex_range, concat, hex_to_bytes,
    length_prefixed_hex_to_bytes, strip_leading_length_byte, CodecError, CodecResult,
    OctetString,
};
pub use config::{CarrierConfig, ClientConfig, EapConfig};
pub use error::Error;
pub use logging::{
    init_logging, init_logging_with_filter, log_sim_exchange, Direction, HexDump, LogLevel,
};
pub use types::{AppType, AuthType, EapMethod, Phase2Method, SubscriberInfo, SubscriptionId};
