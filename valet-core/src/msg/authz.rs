use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::amino::AminoMsg;
use crate::authz::Authorization;
use crate::proto;
use crate::proto::google::Timestamp;

use super::{Msg, MsgError};

/// Grants `grantee` an authorization from `granter`.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgGrant {
    pub granter: String,
    pub grantee: String,
    pub authorization: Authorization,
    /// Expiry of the grant; `None` means it never expires.
    pub expiration: Option<DateTime<Utc>>,
}

impl MsgGrant {
    pub const TYPE_URL: &'static str = "/cosmos.authz.v1beta1.MsgGrant";

    pub(crate) fn to_proto(&self) -> proto::authz::MsgGrant {
        proto::authz::MsgGrant {
            granter: self.granter.clone(),
            grantee: self.grantee.clone(),
            grant: Some(proto::authz::Grant {
                authorization: Some(self.authorization.to_any()),
                expiration: self.expiration.map(|at| Timestamp {
                    seconds: at.timestamp(),
                    nanos: 0,
                }),
            }),
        }
    }

    pub(crate) fn from_proto(msg: &proto::authz::MsgGrant) -> Result<Self, MsgError> {
        let grant = msg.grant.as_ref().ok_or(MsgError::MissingField("grant"))?;
        let authorization = grant
            .authorization
            .as_ref()
            .ok_or(MsgError::MissingField("grant.authorization"))?;
        Ok(Self {
            granter: msg.granter.clone(),
            grantee: msg.grantee.clone(),
            authorization: Authorization::from_any(authorization)?,
            expiration: grant
                .expiration
                .map(|ts| {
                    Utc.timestamp_opt(ts.seconds, 0)
                        .single()
                        .ok_or(MsgError::MissingField("grant.expiration"))
                })
                .transpose()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        let expiration = self
            .expiration
            .map(|at| at.format("%Y-%m-%dT%H:%M:%SZ").to_string());
        AminoMsg::new(
            "cosmos-sdk/MsgGrant",
            json!({
                "granter": self.granter,
                "grantee": self.grantee,
                "grant": {
                    "authorization": self.authorization.to_amino(),
                    "expiration": expiration,
                },
            }),
        )
    }
}

/// Revokes a previously granted authorization for one message type.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgRevoke {
    pub granter: String,
    pub grantee: String,
    pub msg_type_url: String,
}

impl MsgRevoke {
    pub const TYPE_URL: &'static str = "/cosmos.authz.v1beta1.MsgRevoke";

    pub(crate) fn to_proto(&self) -> proto::authz::MsgRevoke {
        proto::authz::MsgRevoke {
            granter: self.granter.clone(),
            grantee: self.grantee.clone(),
            msg_type_url: self.msg_type_url.clone(),
        }
    }

    pub(crate) fn from_proto(msg: &proto::authz::MsgRevoke) -> Self {
        Self {
            granter: msg.granter.clone(),
            grantee: msg.grantee.clone(),
            msg_type_url: msg.msg_type_url.clone(),
        }
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgRevoke",
            json!({
                "granter": self.granter,
                "grantee": self.grantee,
                "msg_type_url": self.msg_type_url,
            }),
        )
    }
}

/// The container message: executes the wrapped messages with `grantee`
/// acting under the wrapped messages' signers' granted authority.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgExec {
    pub grantee: String,
    pub msgs: Vec<Msg>,
}

impl MsgExec {
    pub const TYPE_URL: &'static str = "/cosmos.authz.v1beta1.MsgExec";

    pub(crate) fn to_proto(&self) -> proto::authz::MsgExec {
        proto::authz::MsgExec {
            grantee: self.grantee.clone(),
            msgs: self.msgs.iter().map(Msg::to_any).collect(),
        }
    }

    pub(crate) fn from_proto(msg: &proto::authz::MsgExec) -> Result<Self, MsgError> {
        Ok(Self {
            grantee: msg.grantee.clone(),
            msgs: msg.msgs.iter().map(Msg::from_any).collect::<Result<_, _>>()?,
        })
    }

    pub(crate) fn to_amino(&self) -> AminoMsg {
        AminoMsg::new(
            "cosmos-sdk/MsgExec",
            json!({
                "grantee": self.grantee,
                "msgs": self.msgs.iter().map(Msg::to_amino).collect::<Vec<_>>(),
            }),
        )
    }
}
