//! The closed set of transaction messages the library can build.
//!
//! Every variant renders into each wire encoding the signing pipeline may
//! need: a protobuf [`Any`] for binary-direct signing, and a legacy
//! [`AminoMsg`] for JSON signing (from which EIP-712 typed data is also
//! derived). Messages are immutable values; construct a fresh one per
//! transaction attempt.

mod authz;
mod bank;
mod distribution;
mod gov;
mod staking;

pub use authz::{MsgExec, MsgGrant, MsgRevoke};
pub use bank::MsgSend;
pub use distribution::{MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission};
pub use gov::MsgVote;
pub use staking::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate};

use prost::Message as _;

use crate::amino::AminoMsg;
use crate::proto::google::Any;
use crate::types::CoinError;

/// Errors converting messages between representations.
#[derive(Debug, thiserror::Error)]
pub enum MsgError {
    /// The `Any` carried a type URL outside the supported set.
    #[error("unsupported message type {0}")]
    UnknownTypeUrl(String),
    /// The binary payload did not decode as the tagged type.
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    /// An embedded amount failed validation.
    #[error(transparent)]
    Coin(#[from] CoinError),
    /// A required field was absent from the wire form.
    #[error("missing field {0}")]
    MissingField(&'static str),
}

/// A typed transaction instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Bank transfer.
    Send(MsgSend),
    /// Delegate stake to a validator.
    Delegate(MsgDelegate),
    /// Undelegate stake from a validator.
    Undelegate(MsgUndelegate),
    /// Move stake between validators.
    BeginRedelegate(MsgBeginRedelegate),
    /// Claim staking rewards from one validator.
    WithdrawDelegatorReward(MsgWithdrawDelegatorReward),
    /// Claim validator commission.
    WithdrawValidatorCommission(MsgWithdrawValidatorCommission),
    /// Vote on a governance proposal.
    Vote(MsgVote),
    /// Grant an authorization to another address.
    Grant(MsgGrant),
    /// Revoke a previously granted authorization.
    Revoke(MsgRevoke),
    /// Execute wrapped messages under another address's authority.
    Exec(MsgExec),
}

impl Msg {
    /// The ledger-defined type URL for this message.
    pub fn type_url(&self) -> &'static str {
        match self {
            Msg::Send(_) => MsgSend::TYPE_URL,
            Msg::Delegate(_) => MsgDelegate::TYPE_URL,
            Msg::Undelegate(_) => MsgUndelegate::TYPE_URL,
            Msg::BeginRedelegate(_) => MsgBeginRedelegate::TYPE_URL,
            Msg::WithdrawDelegatorReward(_) => MsgWithdrawDelegatorReward::TYPE_URL,
            Msg::WithdrawValidatorCommission(_) => MsgWithdrawValidatorCommission::TYPE_URL,
            Msg::Vote(_) => MsgVote::TYPE_URL,
            Msg::Grant(_) => MsgGrant::TYPE_URL,
            Msg::Revoke(_) => MsgRevoke::TYPE_URL,
            Msg::Exec(_) => MsgExec::TYPE_URL,
        }
    }

    /// Packs the message into a type-tagged `Any`.
    pub fn to_any(&self) -> Any {
        let value = match self {
            Msg::Send(m) => m.to_proto().encode_to_vec(),
            Msg::Delegate(m) => m.to_proto().encode_to_vec(),
            Msg::Undelegate(m) => m.to_proto().encode_to_vec(),
            Msg::BeginRedelegate(m) => m.to_proto().encode_to_vec(),
            Msg::WithdrawDelegatorReward(m) => m.to_proto().encode_to_vec(),
            Msg::WithdrawValidatorCommission(m) => m.to_proto().encode_to_vec(),
            Msg::Vote(m) => m.to_proto().encode_to_vec(),
            Msg::Grant(m) => m.to_proto().encode_to_vec(),
            Msg::Revoke(m) => m.to_proto().encode_to_vec(),
            Msg::Exec(m) => m.to_proto().encode_to_vec(),
        };
        Any { type_url: self.type_url().to_owned(), value }
    }

    /// Unpacks a type-tagged `Any` back into a message.
    pub fn from_any(any: &Any) -> Result<Self, MsgError> {
        use crate::proto;
        let bytes = any.value.as_slice();
        Ok(match any.type_url.as_str() {
            MsgSend::TYPE_URL => {
                Msg::Send(MsgSend::from_proto(&proto::bank::MsgSend::decode(bytes)?)?)
            }
            MsgDelegate::TYPE_URL => Msg::Delegate(MsgDelegate::from_proto(
                &proto::staking::MsgDelegate::decode(bytes)?,
            )?),
            MsgUndelegate::TYPE_URL => Msg::Undelegate(MsgUndelegate::from_proto(
                &proto::staking::MsgUndelegate::decode(bytes)?,
            )?),
            MsgBeginRedelegate::TYPE_URL => Msg::BeginRedelegate(MsgBeginRedelegate::from_proto(
                &proto::staking::MsgBeginRedelegate::decode(bytes)?,
            )?),
            MsgWithdrawDelegatorReward::TYPE_URL => Msg::WithdrawDelegatorReward(
                MsgWithdrawDelegatorReward::from_proto(
                    &proto::distribution::MsgWithdrawDelegatorReward::decode(bytes)?,
                ),
            ),
            MsgWithdrawValidatorCommission::TYPE_URL => Msg::WithdrawValidatorCommission(
                MsgWithdrawValidatorCommission::from_proto(
                    &proto::distribution::MsgWithdrawValidatorCommission::decode(bytes)?,
                ),
            ),
            MsgVote::TYPE_URL => {
                Msg::Vote(MsgVote::from_proto(&proto::gov::MsgVote::decode(bytes)?))
            }
            MsgGrant::TYPE_URL => {
                Msg::Grant(MsgGrant::from_proto(&proto::authz::MsgGrant::decode(bytes)?)?)
            }
            MsgRevoke::TYPE_URL => {
                Msg::Revoke(MsgRevoke::from_proto(&proto::authz::MsgRevoke::decode(bytes)?))
            }
            MsgExec::TYPE_URL => {
                Msg::Exec(MsgExec::from_proto(&proto::authz::MsgExec::decode(bytes)?)?)
            }
            other => return Err(MsgError::UnknownTypeUrl(other.to_owned())),
        })
    }

    /// Renders the legacy Amino JSON `{type, value}` form.
    pub fn to_amino(&self) -> AminoMsg {
        match self {
            Msg::Send(m) => m.to_amino(),
            Msg::Delegate(m) => m.to_amino(),
            Msg::Undelegate(m) => m.to_amino(),
            Msg::BeginRedelegate(m) => m.to_amino(),
            Msg::WithdrawDelegatorReward(m) => m.to_amino(),
            Msg::WithdrawValidatorCommission(m) => m.to_amino(),
            Msg::Vote(m) => m.to_amino(),
            Msg::Grant(m) => m.to_amino(),
            Msg::Revoke(m) => m.to_amino(),
            Msg::Exec(m) => m.to_amino(),
        }
    }
}
