use serde_json::json;

use crate::amino::AminoMsg;
use crate::proto;
use crate::proto::gov::VoteOption;

/// Casts a vote on a governance proposal.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: String,
    pub option: VoteOption,
}

impl MsgVote {
    pub const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgVote";

    pub(crate) fn to_proto(&self) -> proto::gov::MsgVote {
        proto::gov::MsgVote {
            proposal_id: self.proposal_id,
            voter: self.voter.clone(),
            option: self.option as i32,
        }
    }

    pub(crate) fn from_proto(msg: &proto::gov::MsgVote) -> Self {
        Self {
            proposal_id: msg.proposal_id,
            voter: msg.voter.clone(),
            option: VoteOption::try_from(msg.option).unwrap_or(VoteOption::Unspecified),
        }
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgVote",
            json!({
                "proposal_id": self.proposal_id.to_string(),
                "voter": self.voter,
                "option": self.option as i32,
            }),
        )
    }
}
