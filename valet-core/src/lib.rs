//! Data types and wire encodings for Cosmos-style transactions.
//!
//! This crate contains everything needed to describe a transaction before it
//! is signed: the closed set of supported [`Msg`] variants, their three wire
//! encodings (protobuf `Any`, legacy Amino JSON and EIP-712 typed data),
//! coin/fee arithmetic, authorization grants, and per-chain capability
//! profiles that drive encoding selection higher up the stack.

#![deny(unsafe_code)]

pub mod amino;
pub mod authz;
pub mod chain;
pub mod eip712;
pub mod msg;
pub mod proto;
pub mod types;

pub use amino::{AminoMsg, StdFee, StdSignDoc};
pub use authz::{execute_on_behalf, Authorization, Grant, StakePolicy};
pub use chain::{ApiVersions, ChainProfile};
pub use eip712::{Eip712Domain, Eip712DomainType, TypedData};
pub use msg::{
    Msg, MsgBeginRedelegate, MsgDelegate, MsgError, MsgExec, MsgGrant, MsgRevoke, MsgSend,
    MsgUndelegate, MsgVote, MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission,
};
pub use types::{Coin, CoinError, Fee, GasPrice};
