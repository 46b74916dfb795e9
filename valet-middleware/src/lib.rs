//! The glue between signers, providers and chain rules.
//!
//! [`SigningAdapter`] picks a sign mode and assembles the transaction the
//! way the target chain expects; [`SigningClient`] runs the full
//! simulate/sign/broadcast/confirm pipeline; [`Wallet`] tracks a connected
//! session and answers permission questions against its authz grants.

#![deny(unsafe_code)]

mod adapter;
mod client;
mod wallet;

pub use adapter::{
    overrides_for, AdapterError, ChainOverrides, SignContext, SignError, SigningAdapter,
    DEFAULT_BLOCK_TIMEOUT_HEIGHT,
};
pub use client::{ClientError, SigningClient, DEFAULT_GAS_LIMIT};
pub use wallet::{resolve_message_type, Wallet, MESSAGE_TYPES};
