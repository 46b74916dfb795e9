use serde_json::json;

use crate::amino::AminoMsg;
use crate::proto;

/// Claims accumulated staking rewards from one validator.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgWithdrawDelegatorReward {
    pub delegator_address: String,
    pub validator_address: String,
}

impl MsgWithdrawDelegatorReward {
    pub const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";

    pub(crate) fn to_proto(&self) -> proto::distribution::MsgWithdrawDelegatorReward {
        proto::distribution::MsgWithdrawDelegatorReward {
            delegator_address: self.delegator_address.clone(),
            validator_address: self.validator_address.clone(),
        }
    }

    pub(crate) fn from_proto(msg: &proto::distribution::MsgWithdrawDelegatorReward) -> Self {
        Self {
            delegator_address: msg.delegator_address.clone(),
            validator_address: msg.validator_address.clone(),
        }
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        // the Amino name predates the proto rename
        AminoMsg::new(
            "cosmos-sdk/MsgWithdrawDelegationReward",
            json!({
                "delegator_address": self.delegator_address,
                "validator_address": self.validator_address,
            }),
        )
    }
}

/// Claims a validator's accumulated commission.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgWithdrawValidatorCommission {
    pub validator_address: String,
}

impl MsgWithdrawValidatorCommission {
    pub const TYPE_URL: &'static str =
        "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission";

    pub(crate) fn to_proto(&self) -> proto::distribution::MsgWithdrawValidatorCommission {
        proto::distribution::MsgWithdrawValidatorCommission {
            validator_address: self.validator_address.clone(),
        }
    }

    pub(crate) fn from_proto(msg: &proto::distribution::MsgWithdrawValidatorCommission) -> Self {
        Self { validator_address: msg.validator_address.clone() }
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgWithdrawValidatorCommission",
            json!({ "validator_address": self.validator_address }),
        )
    }
}
