//! Authorization grants and on-behalf execution wrapping.

use chrono::{DateTime, Utc};
use prost::Message as _;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::amino::AminoMsg;
use crate::msg::{Msg, MsgError, MsgExec};
use crate::proto;
use crate::proto::google::Any;
use crate::proto::staking::stake_authorization::{Policy, Validators};
use crate::proto::staking::AuthorizationType;
use crate::types::Coin;

/// Type URL of the generic authorization kind.
pub const GENERIC_AUTHORIZATION_TYPE_URL: &str = "/cosmos.authz.v1beta1.GenericAuthorization";
/// Type URL of the staking-scoped authorization kind.
pub const STAKE_AUTHORIZATION_TYPE_URL: &str = "/cosmos.staking.v1beta1.StakeAuthorization";

/// Validator filter of a staking-scoped authorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakePolicy {
    /// Only the listed validators may be targeted.
    Allow(Vec<String>),
    /// Any validator except the listed ones may be targeted.
    Deny(Vec<String>),
}

/// An authorization kind a granter can delegate.
#[derive(Clone, Debug, PartialEq)]
pub enum Authorization {
    /// Blanket permission to execute one message type.
    Generic {
        /// Type URL of the authorized message.
        msg: String,
    },
    /// Staking permission scoped to validators and an optional cap.
    Stake {
        /// Which validators the grantee may target.
        policy: StakePolicy,
        /// Upper bound on the delegated amount, if any.
        max_tokens: Option<Coin>,
        /// Which staking operation is authorized.
        authorization_type: AuthorizationType,
    },
}

impl Authorization {
    /// Packs the authorization into its type-tagged `Any`.
    pub fn to_any(&self) -> Any {
        match self {
            Authorization::Generic { msg } => Any {
                type_url: GENERIC_AUTHORIZATION_TYPE_URL.to_owned(),
                value: proto::authz::GenericAuthorization { msg: msg.clone() }.encode_to_vec(),
            },
            Authorization::Stake { policy, max_tokens, authorization_type } => {
                let policy = match policy {
                    StakePolicy::Allow(addrs) => {
                        Policy::AllowList(Validators { address: addrs.clone() })
                    }
                    StakePolicy::Deny(addrs) => {
                        Policy::DenyList(Validators { address: addrs.clone() })
                    }
                };
                Any {
                    type_url: STAKE_AUTHORIZATION_TYPE_URL.to_owned(),
                    value: proto::staking::StakeAuthorization {
                        max_tokens: max_tokens.as_ref().map(Coin::to_proto),
                        policy: Some(policy),
                        authorization_type: *authorization_type as i32,
                    }
                    .encode_to_vec(),
                }
            }
        }
    }

    /// Unpacks an `Any` into a supported authorization kind.
    pub fn from_any(any: &Any) -> Result<Self, MsgError> {
        match any.type_url.as_str() {
            GENERIC_AUTHORIZATION_TYPE_URL => {
                let auth = proto::authz::GenericAuthorization::decode(any.value.as_slice())?;
                Ok(Authorization::Generic { msg: auth.msg })
            }
            STAKE_AUTHORIZATION_TYPE_URL => {
                let auth = proto::staking::StakeAuthorization::decode(any.value.as_slice())?;
                let policy = match auth.policy.ok_or(MsgError::MissingField("policy"))? {
                    Policy::AllowList(v) => StakePolicy::Allow(v.address),
                    Policy::DenyList(v) => StakePolicy::Deny(v.address),
                };
                Ok(Authorization::Stake {
                    policy,
                    max_tokens: auth.max_tokens.as_ref().map(Coin::from_proto).transpose()?,
                    authorization_type: AuthorizationType::try_from(auth.authorization_type)
                        .unwrap_or(AuthorizationType::Unspecified),
                })
            }
            other => Err(MsgError::UnknownTypeUrl(other.to_owned())),
        }
    }

    /// Renders the legacy Amino `{type, value}` form.
    pub fn to_amino(&self) -> AminoMsg {
        match self {
            Authorization::Generic { msg } => {
                AminoMsg::new("cosmos-sdk/GenericAuthorization", json!({ "msg": msg }))
            }
            Authorization::Stake { policy, max_tokens, authorization_type } => {
                let validators = match policy {
                    StakePolicy::Allow(addrs) => json!({
                        "type": "cosmos-sdk/StakeAuthorization/AllowList",
                        "value": { "allow_list": { "address": addrs } },
                    }),
                    StakePolicy::Deny(addrs) => json!({
                        "type": "cosmos-sdk/StakeAuthorization/DenyList",
                        "value": { "deny_list": { "address": addrs } },
                    }),
                };
                AminoMsg::new(
                    "cosmos-sdk/StakeAuthorization",
                    json!({
                        "Validators": validators,
                        "max_tokens": max_tokens,
                        "authorization_type": *authorization_type as i32,
                    }),
                )
            }
        }
    }
}

/// A grant as reported by the ledger's authz query endpoints.
///
/// The authorization payload is kept as raw JSON: the permission model only
/// inspects its `@type` and `msg` fields, and unknown authorization kinds
/// must survive a round trip through the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub granter: String,
    pub grantee: String,
    pub authorization: serde_json::Value,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}

impl Grant {
    /// Whether the grant is usable at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expiration.map(|at| at > now).unwrap_or(true)
    }

    /// The message type URL a generic authorization covers, if this is one.
    pub fn generic_msg_type_url(&self) -> Option<&str> {
        if self.authorization.get("@type")?.as_str()? != GENERIC_AUTHORIZATION_TYPE_URL {
            return None;
        }
        self.authorization.get("msg")?.as_str()
    }
}

/// Wraps `msgs` for execution by `acting` under `authority`'s granted
/// authority.
///
/// Returns the list unchanged when the acting address is the authority
/// itself; otherwise returns exactly one container message. Callers invoke
/// this once per transaction build; wrapping an already wrapped list is a
/// caller error and is not detected here.
pub fn execute_on_behalf(acting: &str, authority: &str, msgs: Vec<Msg>) -> Vec<Msg> {
    if acting == authority {
        return msgs;
    }
    vec![Msg::Exec(MsgExec { grantee: acting.to_owned(), msgs })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::MsgWithdrawDelegatorReward;
    use chrono::{Duration, TimeZone};

    fn claim() -> Msg {
        Msg::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
            delegator_address: "cosmos1user".into(),
            validator_address: "cosmosvaloper1val".into(),
        })
    }

    #[test]
    fn same_address_returns_messages_unwrapped() {
        let msgs = vec![claim(), claim()];
        let wrapped = execute_on_behalf("cosmos1user", "cosmos1user", msgs.clone());
        assert_eq!(wrapped, msgs);
    }

    #[test]
    fn different_address_yields_exactly_one_container() {
        for count in 1..4 {
            let msgs: Vec<_> = (0..count).map(|_| claim()).collect();
            let wrapped = execute_on_behalf("cosmos1operator", "cosmos1user", msgs);
            assert_eq!(wrapped.len(), 1);
            match &wrapped[0] {
                Msg::Exec(exec) => {
                    assert_eq!(exec.grantee, "cosmos1operator");
                    assert_eq!(exec.msgs.len(), count);
                }
                other => panic!("expected Exec, got {other:?}"),
            }
        }
    }

    #[test]
    fn grant_activity_follows_expiration() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 0, 0, 0).unwrap();
        let mut grant = Grant {
            granter: "cosmos1user".into(),
            grantee: "cosmos1operator".into(),
            authorization: json!({
                "@type": GENERIC_AUTHORIZATION_TYPE_URL,
                "msg": "/cosmos.staking.v1beta1.MsgDelegate",
            }),
            expiration: None,
        };
        assert!(grant.is_active(now));

        grant.expiration = Some(now + Duration::days(1));
        assert!(grant.is_active(now));

        grant.expiration = Some(now - Duration::days(1));
        assert!(!grant.is_active(now));
    }

    #[test]
    fn generic_msg_type_url_ignores_other_kinds() {
        let grant = Grant {
            granter: "a".into(),
            grantee: "b".into(),
            authorization: json!({
                "@type": STAKE_AUTHORIZATION_TYPE_URL,
                "max_tokens": null,
            }),
            expiration: None,
        };
        assert_eq!(grant.generic_msg_type_url(), None);
    }

    #[test]
    fn authorization_any_round_trips() {
        let auths = [
            Authorization::Generic { msg: "/cosmos.gov.v1beta1.MsgVote".into() },
            Authorization::Stake {
                policy: StakePolicy::Deny(vec!["cosmosvaloper1bad".into()]),
                max_tokens: None,
                authorization_type: AuthorizationType::Redelegate,
            },
        ];
        for auth in auths {
            assert_eq!(Authorization::from_any(&auth.to_any()).unwrap(), auth);
        }
    }
}
