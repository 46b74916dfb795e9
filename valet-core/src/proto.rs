//! Hand-rolled protobuf definitions for the closed set of cosmos-sdk wire
//! types this library produces and consumes.
//!
//! These mirror the upstream `.proto` files field-for-field; only the
//! messages the signing pipeline actually touches are defined.

#![allow(missing_docs)]

/// `google.protobuf` well-known types.
pub mod google {
    /// A type-tagged, length-delimited protobuf payload.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Any {
        #[prost(string, tag = "1")]
        pub type_url: ::prost::alloc::string::String,
        #[prost(bytes = "vec", tag = "2")]
        pub value: ::prost::alloc::vec::Vec<u8>,
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct Timestamp {
        #[prost(int64, tag = "1")]
        pub seconds: i64,
        #[prost(int32, tag = "2")]
        pub nanos: i32,
    }
}

/// `cosmos.base.v1beta1`
pub mod base {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Coin {
        #[prost(string, tag = "1")]
        pub denom: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub amount: ::prost::alloc::string::String,
    }
}

/// `cosmos.bank.v1beta1`
pub mod bank {
    use super::base::Coin;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgSend {
        #[prost(string, tag = "1")]
        pub from_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub to_address: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "3")]
        pub amount: ::prost::alloc::vec::Vec<Coin>,
    }
}

/// `cosmos.staking.v1beta1`
pub mod staking {
    use super::base::Coin;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgDelegate {
        #[prost(string, tag = "1")]
        pub delegator_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub validator_address: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "3")]
        pub amount: ::core::option::Option<Coin>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgUndelegate {
        #[prost(string, tag = "1")]
        pub delegator_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub validator_address: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "3")]
        pub amount: ::core::option::Option<Coin>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgBeginRedelegate {
        #[prost(string, tag = "1")]
        pub delegator_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub validator_src_address: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub validator_dst_address: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "4")]
        pub amount: ::core::option::Option<Coin>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct StakeAuthorization {
        #[prost(message, optional, tag = "1")]
        pub max_tokens: ::core::option::Option<Coin>,
        #[prost(oneof = "stake_authorization::Policy", tags = "2, 3")]
        pub policy: ::core::option::Option<stake_authorization::Policy>,
        #[prost(enumeration = "AuthorizationType", tag = "4")]
        pub authorization_type: i32,
    }

    pub mod stake_authorization {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Validators {
            #[prost(string, repeated, tag = "1")]
            pub address: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Policy {
            #[prost(message, tag = "2")]
            AllowList(Validators),
            #[prost(message, tag = "3")]
            DenyList(Validators),
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum AuthorizationType {
        Unspecified = 0,
        Delegate = 1,
        Undelegate = 2,
        Redelegate = 3,
    }
}

/// `cosmos.distribution.v1beta1`
pub mod distribution {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgWithdrawDelegatorReward {
        #[prost(string, tag = "1")]
        pub delegator_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub validator_address: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgWithdrawValidatorCommission {
        #[prost(string, tag = "1")]
        pub validator_address: ::prost::alloc::string::String,
    }
}

/// `cosmos.gov.v1beta1`
pub mod gov {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgVote {
        #[prost(uint64, tag = "1")]
        pub proposal_id: u64,
        #[prost(string, tag = "2")]
        pub voter: ::prost::alloc::string::String,
        #[prost(enumeration = "VoteOption", tag = "3")]
        pub option: i32,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum VoteOption {
        Unspecified = 0,
        Yes = 1,
        Abstain = 2,
        No = 3,
        NoWithVeto = 4,
    }
}

/// `cosmos.authz.v1beta1`
pub mod authz {
    use super::google::{Any, Timestamp};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GenericAuthorization {
        #[prost(string, tag = "1")]
        pub msg: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Grant {
        #[prost(message, optional, tag = "1")]
        pub authorization: ::core::option::Option<Any>,
        #[prost(message, optional, tag = "2")]
        pub expiration: ::core::option::Option<Timestamp>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgGrant {
        #[prost(string, tag = "1")]
        pub granter: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub grantee: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "3")]
        pub grant: ::core::option::Option<Grant>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgExec {
        #[prost(string, tag = "1")]
        pub grantee: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "2")]
        pub msgs: ::prost::alloc::vec::Vec<Any>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgRevoke {
        #[prost(string, tag = "1")]
        pub granter: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub grantee: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub msg_type_url: ::prost::alloc::string::String,
    }
}

/// `cosmos.crypto.secp256k1`
pub mod crypto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PubKey {
        #[prost(bytes = "vec", tag = "1")]
        pub key: ::prost::alloc::vec::Vec<u8>,
    }
}

/// `cosmos.tx.v1beta1` and `cosmos.tx.signing.v1beta1`
pub mod tx {
    use super::base::Coin;
    use super::google::Any;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TxBody {
        #[prost(message, repeated, tag = "1")]
        pub messages: ::prost::alloc::vec::Vec<Any>,
        #[prost(string, tag = "2")]
        pub memo: ::prost::alloc::string::String,
        #[prost(uint64, tag = "3")]
        pub timeout_height: u64,
        #[prost(message, repeated, tag = "1023")]
        pub extension_options: ::prost::alloc::vec::Vec<Any>,
        #[prost(message, repeated, tag = "2047")]
        pub non_critical_extension_options: ::prost::alloc::vec::Vec<Any>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Fee {
        #[prost(message, repeated, tag = "1")]
        pub amount: ::prost::alloc::vec::Vec<Coin>,
        #[prost(uint64, tag = "2")]
        pub gas_limit: u64,
        #[prost(string, tag = "3")]
        pub payer: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub granter: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SignerInfo {
        #[prost(message, optional, tag = "1")]
        pub public_key: ::core::option::Option<Any>,
        #[prost(message, optional, tag = "2")]
        pub mode_info: ::core::option::Option<ModeInfo>,
        #[prost(uint64, tag = "3")]
        pub sequence: u64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ModeInfo {
        #[prost(oneof = "mode_info::Sum", tags = "1")]
        pub sum: ::core::option::Option<mode_info::Sum>,
    }

    pub mod mode_info {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Single {
            #[prost(enumeration = "super::SignMode", tag = "1")]
            pub mode: i32,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Sum {
            #[prost(message, tag = "1")]
            Single(Single),
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SignMode {
        Unspecified = 0,
        Direct = 1,
        Textual = 2,
        LegacyAminoJson = 127,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuthInfo {
        #[prost(message, repeated, tag = "1")]
        pub signer_infos: ::prost::alloc::vec::Vec<SignerInfo>,
        #[prost(message, optional, tag = "2")]
        pub fee: ::core::option::Option<Fee>,
    }

    /// The canonical transaction envelope: each member is independently
    /// encoded and the whole thing is what gets broadcast.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TxRaw {
        #[prost(bytes = "vec", tag = "1")]
        pub body_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(bytes = "vec", repeated, tag = "3")]
        pub signatures: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    }

    /// The document covered by a binary-direct signature.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SignDoc {
        #[prost(bytes = "vec", tag = "1")]
        pub body_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(string, tag = "3")]
        pub chain_id: ::prost::alloc::string::String,
        #[prost(uint64, tag = "4")]
        pub account_number: u64,
    }
}

/// `injective.types.v1beta1`: the web3 extension appended to typed-data
/// signed transactions on EVM-compatible consensus chains.
pub mod injective {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ExtensionOptionsWeb3Tx {
        #[prost(uint64, tag = "1")]
        pub typed_data_chain_id: u64,
        #[prost(string, tag = "2")]
        pub fee_payer: ::prost::alloc::string::String,
        #[prost(bytes = "vec", tag = "3")]
        pub fee_payer_sig: ::prost::alloc::vec::Vec<u8>,
    }
}
