use serde_json::json;

use crate::amino::AminoMsg;
use crate::proto;
use crate::types::Coin;

use super::MsgError;

/// Transfer of one or more coins between accounts.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

impl MsgSend {
    pub const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";

    pub(crate) fn to_proto(&self) -> proto::bank::MsgSend {
        proto::bank::MsgSend {
            from_address: self.from_address.clone(),
            to_address: self.to_address.clone(),
            amount: self.amount.iter().map(Coin::to_proto).collect(),
        }
    }

    pub(crate) fn from_proto(msg: &proto::bank::MsgSend) -> Result<Self, MsgError> {
        Ok(Self {
            from_address: msg.from_address.clone(),
            to_address: msg.to_address.clone(),
            amount: msg
                .amount
                .iter()
                .map(Coin::from_proto)
                .collect::<Result<_, _>>()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgSend",
            json!({
                "from_address": self.from_address,
                "to_address": self.to_address,
                "amount": self.amount,
            }),
        )
    }
}
