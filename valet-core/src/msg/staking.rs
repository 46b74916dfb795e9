use serde_json::json;

use crate::amino::AminoMsg;
use crate::proto;
use crate::types::Coin;

use super::MsgError;

/// Delegates stake to a validator.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgDelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Option<Coin>,
}

impl MsgDelegate {
    pub const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgDelegate";

    pub(crate) fn to_proto(&self) -> proto::staking::MsgDelegate {
        proto::staking::MsgDelegate {
            delegator_address: self.delegator_address.clone(),
            validator_address: self.validator_address.clone(),
            amount: self.amount.as_ref().map(Coin::to_proto),
        }
    }

    pub(crate) fn from_proto(msg: &proto::staking::MsgDelegate) -> Result<Self, MsgError> {
        Ok(Self {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
            amount: msg.amount.as_ref().map(Coin::from_proto).transpose()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgDelegate",
            json!({
                "delegator_address": self.delegator_address,
                "validator_address": self.validator_address,
                "amount": self.amount,
            }),
        )
    }
}

/// Undelegates stake from a validator.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgUndelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Option<Coin>,
}

impl MsgUndelegate {
    pub const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgUndelegate";

    pub(crate) fn to_proto(&self) -> proto::staking::MsgUndelegate {
        proto::staking::MsgUndelegate {
            delegator_address: self.delegator_address.clone(),
            validator_address: self.validator_address.clone(),
            amount: self.amount.as_ref().map(Coin::to_proto),
        }
    }

    pub(crate) fn from_proto(msg: &proto::staking::MsgUndelegate) -> Result<Self, MsgError> {
        Ok(Self {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
            amount: msg.amount.as_ref().map(Coin::from_proto).transpose()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgUndelegate",
            json!({
                "delegator_address": self.delegator_address,
                "validator_address": self.validator_address,
                "amount": self.amount,
            }),
        )
    }
}

/// Moves stake from one validator to another without unbonding.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgBeginRedelegate {
    pub delegator_address: String,
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub amount: Option<Coin>,
}

impl MsgBeginRedelegate {
    pub const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";

    pub(crate) fn to_proto(&self) -> proto::staking::MsgBeginRedelegate {
        proto::staking::MsgBeginRedelegate {
            delegator_address: self.delegator_address.clone(),
            validator_src_address: self.validator_src_address.clone(),
            validator_dst_address: self.validator_dst_address.clone(),
            amount: self.amount.as_ref().map(Coin::to_proto),
        }
    }

    pub(crate) fn from_proto(msg: &proto::staking::MsgBeginRedelegate) -> Result<Self, MsgError> {
        Ok(Self {
            delegator_address: msg.delegator_address.clone(),
            validator_src_address: msg.validator_src_address.clone(),
            validator_dst_address: msg.validator_dst_address.clone(),
            amount: msg.amount.as_ref().map(Coin::from_proto).transpose()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgBeginRedelegate",
            json!({
                "delegator_address": self.delegator_address,
                "validator_src_address": self.validator_src_address,
                "validator_dst_address": self.validator_dst_address,
                "amount": self.amount,
            }),
        )
    }
}
