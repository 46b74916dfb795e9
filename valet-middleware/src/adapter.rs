//! Chain-aware transaction assembly and sign-mode selection.

use prost::Message as _;
use serde_json::Value;
use thiserror::Error;

use valet_core::amino::{StdFee, StdSignDoc};
use valet_core::chain::ChainProfile;
use valet_core::eip712::{self, Eip712Error};
use valet_core::msg::{Msg, MsgError};
use valet_core::proto::google::Any;
use valet_core::proto::injective::ExtensionOptionsWeb3Tx;
use valet_core::proto::crypto;
use valet_core::proto::tx::{
    mode_info, AuthInfo, ModeInfo, SignDoc, SignMode, SignerInfo, TxBody, TxRaw,
};
use valet_core::types::Fee;
use valet_signers::SignerProvider;

/// Extra blocks granted to a typed-data signature before it expires.
pub const DEFAULT_BLOCK_TIMEOUT_HEIGHT: u64 = 90;

/// Ethereum chain id claimed in typed-data domains.
const TYPED_DATA_ETHEREUM_CHAIN_ID: u64 = 1;

const WEB3_EXTENSION_TYPE_URL: &str = "/injective.types.v1beta1.ExtensionOptionsWeb3Tx";

/// Failures while assembling or converting a transaction.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("this chain does not support amino conversion for authorization messages")]
    AuthzAminoUnsupported,

    /// The chain only converts generic authorization cleanly; when the
    /// signer can sign direct we refuse the lossy conversion instead.
    #[error(
        "this chain does not fully support amino conversion for authorization \
         messages, using direct signing instead"
    )]
    AuthzAminoGenericOnly,

    #[error("this chain does not support amino conversion for Exec with types: {0}")]
    ExecPreventedTypes(String),

    #[error("this chain does not support amino conversion for types: {0}")]
    PreventedTypes(String),

    #[error("this chain does not support amino conversion for Exec")]
    ExecLiftedUnsupported,

    #[error("unable to sign message with this wallet/signer")]
    NoSigningMethod,

    /// Typed-data signing needs the latest block height for the timeout.
    #[error("typed data signing requires the latest block height")]
    MissingLatestHeight,

    /// The wallet returned a signed fee that cannot be re-encoded.
    #[error("signed document carries an invalid fee")]
    InvalidSignedFee,

    #[error(transparent)]
    Msg(#[from] MsgError),

    #[error(transparent)]
    Eip712(#[from] Eip712Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// A sign attempt failure: either assembly or the signer itself.
#[derive(Debug, Error)]
pub enum SignError<E: std::error::Error + Send + Sync> {
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("{0}")]
    Signer(E),
}

/// Per-chain deviations from the default signing behavior.
///
/// Kept as a data table rather than a trait hierarchy: each known chain
/// differs from the default in at most one guard and one constant.
#[derive(Clone, Copy, Default)]
pub struct ChainOverrides {
    /// Extra pre-check applied before amino conversion.
    pub amino_guard: Option<fn(&[Msg]) -> Result<(), AdapterError>>,
    /// Key scheme used when the account has not reported one.
    pub pubkey_type_url: Option<&'static str>,
    /// Whether hardware devices sign EIP-712 typed data on this chain.
    pub typed_data: bool,
}

impl std::fmt::Debug for ChainOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainOverrides")
            .field("amino_guard", &self.amino_guard.is_some())
            .field("pubkey_type_url", &self.pubkey_type_url)
            .field("typed_data", &self.typed_data)
            .finish()
    }
}

/// The overrides for a chain, keyed by its profile `path`.
pub fn overrides_for(path: &str) -> ChainOverrides {
    match path {
        // Exec of gov messages is broken over amino on osmosis,
        // see osmosis-labs/cosmos-sdk#342
        "osmosis" => ChainOverrides {
            amino_guard: Some(reject_gov_in_exec),
            ..ChainOverrides::default()
        },
        "injective" => ChainOverrides {
            pubkey_type_url: Some("/injective.crypto.v1beta1.ethsecp256k1.PubKey"),
            typed_data: true,
            ..ChainOverrides::default()
        },
        _ => ChainOverrides::default(),
    }
}

fn reject_gov_in_exec(msgs: &[Msg]) -> Result<(), AdapterError> {
    for msg in msgs {
        if let Msg::Exec(exec) = msg {
            if exec.msgs.iter().any(|inner| inner.type_url().starts_with("/cosmos.gov")) {
                return Err(AdapterError::ExecPreventedTypes("/cosmos.gov".to_owned()));
            }
        }
    }
    Ok(())
}

/// Everything about the signing account the adapter needs, fetched by the
/// client before the sign call so the adapter itself stays free of I/O.
#[derive(Clone, Debug)]
pub struct SignContext<'a> {
    pub chain_id: &'a str,
    pub address: &'a str,
    pub account_number: u64,
    pub sequence: u64,
    /// Compressed public key of the signer.
    pub pub_key: &'a [u8],
    /// The account-reported key type URL, if any.
    pub account_pub_key_type: Option<&'a str>,
    /// Latest block height, required for the typed-data path.
    pub latest_height: Option<u64>,
}

/// Builds and signs transactions for one chain.
#[derive(Clone, Debug)]
pub struct SigningAdapter {
    profile: ChainProfile,
    overrides: ChainOverrides,
}

impl SigningAdapter {
    /// Creates the adapter for a profile, resolving its overrides.
    pub fn new(profile: ChainProfile) -> Self {
        let overrides = overrides_for(&profile.path);
        Self { profile, overrides }
    }

    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    pub fn overrides(&self) -> &ChainOverrides {
        &self.overrides
    }

    /// Whether signing will need the latest block height for this signer.
    pub fn needs_latest_height<S: SignerProvider>(&self, signer: &S) -> bool {
        self.overrides.typed_data && signer.capabilities().is_hardware
    }

    /// Converts messages to their amino forms, applying the chain's
    /// restrictions. `direct_support` matters: a chain that only converts
    /// generic authorization refuses the conversion when the signer could
    /// sign direct instead.
    pub fn convert_to_amino(
        &self,
        msgs: &[Msg],
        direct_support: bool,
    ) -> Result<Vec<Value>, AdapterError> {
        if let Some(guard) = self.overrides.amino_guard {
            guard(msgs)?;
        }
        msgs.iter().map(|msg| self.convert_one(msg, direct_support)).collect()
    }

    fn convert_one(&self, msg: &Msg, direct_support: bool) -> Result<Value, AdapterError> {
        let type_url = msg.type_url();
        if type_url.starts_with("/cosmos.authz") {
            if !self.profile.authz_amino_support {
                return Err(AdapterError::AuthzAminoUnsupported);
            }
            if self.profile.authz_amino_generic_only && direct_support {
                return Err(AdapterError::AuthzAminoGenericOnly);
            }
        }
        if let Msg::Exec(exec) = msg {
            let prevented: Vec<&str> = exec
                .msgs
                .iter()
                .map(Msg::type_url)
                .filter(|inner| {
                    self.profile
                        .authz_amino_exec_prevent_types
                        .iter()
                        .any(|prevent| inner.contains(prevent.as_str()))
                })
                .collect();
            if !prevented.is_empty() {
                return Err(AdapterError::ExecPreventedTypes(prevented.join(", ")));
            }
        }
        if self
            .profile
            .amino_prevent_types
            .iter()
            .any(|prevent| type_url.contains(prevent.as_str()))
        {
            return Err(AdapterError::PreventedTypes(type_url.to_owned()));
        }

        let amino = msg.to_amino();
        if self.profile.authz_amino_lifted_values {
            match amino.kind.as_str() {
                // old chains expect the envelope and the nested
                // authorization envelope stripped
                "cosmos-sdk/MsgGrant" => {
                    let mut value = amino.value;
                    let lifted = value
                        .pointer_mut("/grant/authorization")
                        .map(|auth| auth["value"].take());
                    if let (Some(slot), Some(lifted)) =
                        (value.pointer_mut("/grant/authorization"), lifted)
                    {
                        *slot = lifted;
                    }
                    return Ok(value);
                }
                "cosmos-sdk/MsgRevoke" => return Ok(amino.value),
                "cosmos-sdk/MsgExec" => return Err(AdapterError::ExecLiftedUnsupported),
                _ => {}
            }
        }
        Ok(serde_json::to_value(amino)?)
    }

    /// The type URL the signer's public key is packed under: the account
    /// report wins, then the chain override, then the key scheme implied
    /// by the coin type.
    pub fn pubkey_type_url(&self, account_pub_key_type: Option<&str>) -> String {
        if let Some(reported) = account_pub_key_type {
            return reported.to_owned();
        }
        if let Some(url) = self.overrides.pubkey_type_url {
            return url.to_owned();
        }
        if self.profile.slip44 == 60 {
            return "/ethermint.crypto.v1.ethsecp256k1.PubKey".to_owned();
        }
        "/cosmos.crypto.secp256k1.PubKey".to_owned()
    }

    /// Encodes the transaction body.
    pub fn make_body_bytes(
        &self,
        msgs: &[Msg],
        memo: &str,
        timeout_height: Option<u64>,
        extension_options: Vec<Any>,
    ) -> Vec<u8> {
        TxBody {
            messages: msgs.iter().map(Msg::to_any).collect(),
            memo: memo.to_owned(),
            timeout_height: timeout_height.unwrap_or(0),
            extension_options,
            non_critical_extension_options: vec![],
        }
        .encode_to_vec()
    }

    /// Encodes the auth info for a single-signer transaction.
    pub fn make_auth_info_bytes(
        &self,
        ctx: &SignContext<'_>,
        fee: &Fee,
        mode: SignMode,
    ) -> Vec<u8> {
        let pub_key = crypto::PubKey { key: ctx.pub_key.to_vec() }.encode_to_vec();
        AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(Any {
                    type_url: self.pubkey_type_url(ctx.account_pub_key_type),
                    value: pub_key,
                }),
                mode_info: Some(ModeInfo {
                    sum: Some(mode_info::Sum::Single(mode_info::Single { mode: mode as i32 })),
                }),
                sequence: ctx.sequence,
            }],
            fee: Some(fee.to_proto()),
        }
        .encode_to_vec()
    }

    /// A transaction with a placeholder signature, for gas estimation.
    pub fn simulate_tx(
        &self,
        ctx: &SignContext<'_>,
        msgs: &[Msg],
        memo: &str,
        fee: &Fee,
    ) -> TxRaw {
        TxRaw {
            body_bytes: self.make_body_bytes(msgs, memo, None, vec![]),
            auth_info_bytes: self.make_auth_info_bytes(ctx, fee, SignMode::Unspecified),
            signatures: vec![vec![]],
        }
    }

    /// Signs with the most compatible method the signer offers:
    /// typed data for EIP-712 hardware chains, then amino, then direct.
    ///
    /// A failed amino conversion falls through to direct signing when the
    /// signer supports it; when amino was the signer's only method the
    /// conversion error is the answer.
    pub async fn sign<S: SignerProvider>(
        &self,
        signer: &S,
        ctx: &SignContext<'_>,
        msgs: &[Msg],
        memo: &str,
        fee: &Fee,
    ) -> Result<TxRaw, SignError<S::Error>> {
        let caps = signer.capabilities();

        if self.needs_latest_height(signer) {
            if !caps.sign_eip712 {
                return Err(AdapterError::NoSigningMethod.into());
            }
            return self.sign_typed_data(signer, ctx, msgs, memo, fee).await;
        }

        if caps.sign_amino {
            match self.convert_to_amino(msgs, caps.sign_direct) {
                Ok(amino_msgs) => {
                    return self.sign_amino(signer, ctx, msgs, amino_msgs, memo, fee).await
                }
                Err(err) if caps.sign_direct => {
                    tracing::warn!(error = %err, "amino conversion failed, signing direct");
                }
                Err(err) => return Err(err.into()),
            }
        }

        if caps.sign_direct {
            return self.sign_direct(signer, ctx, msgs, memo, fee).await;
        }

        Err(AdapterError::NoSigningMethod.into())
    }

    async fn sign_amino<S: SignerProvider>(
        &self,
        signer: &S,
        ctx: &SignContext<'_>,
        msgs: &[Msg],
        amino_msgs: Vec<Value>,
        memo: &str,
        fee: &Fee,
    ) -> Result<TxRaw, SignError<S::Error>> {
        let doc = self.make_amino_doc(ctx, amino_msgs, memo, fee);
        let response = signer
            .sign_amino(ctx.chain_id, ctx.address, doc)
            .await
            .map_err(SignError::Signer)?;

        // the wallet may have adjusted the fee or memo; what was signed
        // is what must be broadcast
        let signed_fee = signed_fee(&response.signed.fee)?;
        Ok(TxRaw {
            body_bytes: self.make_body_bytes(msgs, &response.signed.memo, None, vec![]),
            auth_info_bytes: self.make_auth_info_bytes(
                ctx,
                &signed_fee,
                SignMode::LegacyAminoJson,
            ),
            signatures: vec![response.signature],
        })
    }

    async fn sign_direct<S: SignerProvider>(
        &self,
        signer: &S,
        ctx: &SignContext<'_>,
        msgs: &[Msg],
        memo: &str,
        fee: &Fee,
    ) -> Result<TxRaw, SignError<S::Error>> {
        let doc = SignDoc {
            body_bytes: self.make_body_bytes(msgs, memo, None, vec![]),
            auth_info_bytes: self.make_auth_info_bytes(ctx, fee, SignMode::Direct),
            chain_id: ctx.chain_id.to_owned(),
            account_number: ctx.account_number,
        };
        let response = signer
            .sign_direct(ctx.chain_id, ctx.address, doc)
            .await
            .map_err(SignError::Signer)?;
        Ok(TxRaw {
            body_bytes: response.signed.body_bytes,
            auth_info_bytes: response.signed.auth_info_bytes,
            signatures: vec![response.signature],
        })
    }

    async fn sign_typed_data<S: SignerProvider>(
        &self,
        signer: &S,
        ctx: &SignContext<'_>,
        msgs: &[Msg],
        memo: &str,
        fee: &Fee,
    ) -> Result<TxRaw, SignError<S::Error>> {
        let latest = ctx.latest_height.ok_or(AdapterError::MissingLatestHeight)?;
        let timeout_height = latest + DEFAULT_BLOCK_TIMEOUT_HEIGHT;

        let amino_msgs =
            self.convert_to_amino(msgs, false).map_err(AdapterError::from)?;
        let doc = self.make_amino_doc(ctx, amino_msgs, memo, fee);
        let typed_data = eip712::typed_data(&doc, timeout_height, TYPED_DATA_ETHEREUM_CHAIN_ID)
            .map_err(AdapterError::from)?;
        let response = signer
            .sign_eip712(ctx.chain_id, ctx.address, typed_data, doc)
            .await
            .map_err(SignError::Signer)?;

        let signed_fee = signed_fee(&response.signed.fee)?;
        let web3_extension = Any {
            type_url: WEB3_EXTENSION_TYPE_URL.to_owned(),
            value: ExtensionOptionsWeb3Tx {
                typed_data_chain_id: TYPED_DATA_ETHEREUM_CHAIN_ID,
                fee_payer: String::new(),
                fee_payer_sig: vec![],
            }
            .encode_to_vec(),
        };
        Ok(TxRaw {
            body_bytes: self.make_body_bytes(
                msgs,
                &response.signed.memo,
                Some(timeout_height),
                vec![web3_extension],
            ),
            auth_info_bytes: self.make_auth_info_bytes(
                ctx,
                &signed_fee,
                SignMode::LegacyAminoJson,
            ),
            signatures: vec![response.signature],
        })
    }

    fn make_amino_doc(
        &self,
        ctx: &SignContext<'_>,
        msgs: Vec<Value>,
        memo: &str,
        fee: &Fee,
    ) -> StdSignDoc {
        StdSignDoc {
            account_number: ctx.account_number.to_string(),
            chain_id: ctx.chain_id.to_owned(),
            fee: StdFee::from_fee(fee),
            memo: memo.to_owned(),
            msgs,
            sequence: ctx.sequence.to_string(),
        }
    }
}

/// Re-reads the fee the wallet actually signed.
fn signed_fee(fee: &StdFee) -> Result<Fee, AdapterError> {
    Ok(Fee {
        amount: fee.amount.clone(),
        gas_limit: fee.gas.parse().map_err(|_| AdapterError::InvalidSignedFee)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;
    use valet_core::authz::{execute_on_behalf, Authorization};
    use valet_core::msg::{MsgExec, MsgGrant, MsgRevoke, MsgVote, MsgWithdrawDelegatorReward};
    use valet_core::proto::gov::VoteOption;
    use valet_core::types::Coin;
    use valet_signers::{HardwareRestricted, LocalWallet};

    fn profile(path: &str) -> ChainProfile {
        ChainProfile::new("testchain-1", "cosmos", "uatom", "0.025uatom".parse().unwrap())
            .with_path(path)
    }

    fn claim() -> Msg {
        Msg::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
            delegator_address: "cosmos1user".into(),
            validator_address: "cosmosvaloper1val".into(),
        })
    }

    fn vote() -> Msg {
        Msg::Vote(MsgVote {
            proposal_id: 12,
            voter: "cosmos1user".into(),
            option: VoteOption::Yes,
        })
    }

    fn exec(msgs: Vec<Msg>) -> Msg {
        Msg::Exec(MsgExec { grantee: "cosmos1operator".into(), msgs })
    }

    fn fee() -> Fee {
        Fee {
            amount: vec![Coin { denom: "uatom".into(), amount: 5000 }],
            gas_limit: 200_000,
        }
    }

    fn signed_mode(raw: &TxRaw) -> i32 {
        let auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice()).unwrap();
        match auth_info.signer_infos[0]
            .mode_info
            .as_ref()
            .and_then(|info| info.sum.as_ref())
        {
            Some(mode_info::Sum::Single(single)) => single.mode,
            None => panic!("missing mode info"),
        }
    }

    fn ctx<'a>(pub_key: &'a [u8]) -> SignContext<'a> {
        SignContext {
            chain_id: "testchain-1",
            address: "cosmos1user",
            account_number: 5,
            sequence: 2,
            pub_key,
            account_pub_key_type: None,
            latest_height: None,
        }
    }

    #[test]
    fn osmosis_rejects_gov_messages_inside_exec() {
        let adapter = SigningAdapter::new(profile("osmosis"));
        let err = adapter
            .convert_to_amino(&[exec(vec![vote()])], false)
            .unwrap_err();
        assert!(matches!(err, AdapterError::ExecPreventedTypes(_)));

        // non-gov exec converts fine
        adapter.convert_to_amino(&[exec(vec![claim()])], false).unwrap();
        // and gov outside exec converts fine
        adapter.convert_to_amino(&[vote()], false).unwrap();
    }

    #[test]
    fn exec_prevent_types_match_substrings() {
        let mut profile = profile("");
        profile.authz_amino_exec_prevent_types = vec!["MsgVote".into()];
        let adapter = SigningAdapter::new(profile);
        let err = adapter.convert_to_amino(&[exec(vec![vote()])], false).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::ExecPreventedTypes(types) if types.contains("MsgVote")
        ));
    }

    #[test]
    fn authz_without_amino_support_fails_conversion() {
        let mut profile = profile("");
        profile.authz_amino_support = false;
        let adapter = SigningAdapter::new(profile);
        let msgs = execute_on_behalf("cosmos1operator", "cosmos1user", vec![claim()]);
        let err = adapter.convert_to_amino(&msgs, false).unwrap_err();
        assert!(matches!(err, AdapterError::AuthzAminoUnsupported));
    }

    #[test]
    fn generic_only_chains_prefer_direct_when_available() {
        let mut profile = profile("");
        profile.authz_amino_generic_only = true;
        let adapter = SigningAdapter::new(profile);
        let msgs = execute_on_behalf("cosmos1operator", "cosmos1user", vec![claim()]);

        let err = adapter.convert_to_amino(&msgs, true).unwrap_err();
        assert!(matches!(err, AdapterError::AuthzAminoGenericOnly));
    }

    #[test]
    fn lifted_values_strip_grant_envelopes() {
        let mut profile = profile("");
        profile.authz_amino_lifted_values = true;
        let adapter = SigningAdapter::new(profile);

        let grant = Msg::Grant(MsgGrant {
            granter: "cosmos1user".into(),
            grantee: "cosmos1operator".into(),
            authorization: Authorization::Generic {
                msg: "/cosmos.staking.v1beta1.MsgDelegate".into(),
            },
            expiration: None,
        });
        let converted = adapter.convert_to_amino(&[grant], false).unwrap();
        // no {type, value} envelope, and the authorization is its bare value
        assert!(converted[0].get("type").is_none());
        assert_eq!(
            converted[0]["grant"]["authorization"]["msg"],
            "/cosmos.staking.v1beta1.MsgDelegate"
        );

        let revoke = Msg::Revoke(MsgRevoke {
            granter: "cosmos1user".into(),
            grantee: "cosmos1operator".into(),
            msg_type_url: "/cosmos.staking.v1beta1.MsgDelegate".into(),
        });
        let converted = adapter.convert_to_amino(&[revoke], false).unwrap();
        assert!(converted[0].get("type").is_none());
        assert_eq!(converted[0]["granter"], "cosmos1user");

        let err = adapter
            .convert_to_amino(&[exec(vec![claim()])], false)
            .unwrap_err();
        assert!(matches!(err, AdapterError::ExecLiftedUnsupported));
    }

    #[test]
    fn amino_doc_carries_only_canonical_fields() {
        let adapter = SigningAdapter::new(profile(""));
        let key = [2u8; 33];
        let msgs = adapter.convert_to_amino(&[claim()], false).unwrap();
        let doc = adapter.make_amino_doc(&ctx(&key), msgs, "memo", &fee());

        let value = serde_json::to_value(&doc).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["account_number", "chain_id", "fee", "memo", "msgs", "sequence"]
        );
    }

    #[test]
    fn pubkey_resolution_order() {
        let adapter = SigningAdapter::new(profile("injective"));
        assert_eq!(
            adapter.pubkey_type_url(Some("/custom.PubKey")),
            "/custom.PubKey"
        );
        assert_eq!(
            adapter.pubkey_type_url(None),
            "/injective.crypto.v1beta1.ethsecp256k1.PubKey"
        );

        let adapter = SigningAdapter::new(profile("").with_slip44(60));
        assert_eq!(
            adapter.pubkey_type_url(None),
            "/ethermint.crypto.v1.ethsecp256k1.PubKey"
        );

        let adapter = SigningAdapter::new(profile(""));
        assert_eq!(adapter.pubkey_type_url(None), "/cosmos.crypto.secp256k1.PubKey");
    }

    #[tokio::test]
    async fn software_keys_sign_amino_first() {
        let wallet = LocalWallet::random(&mut rand::thread_rng());
        let adapter = SigningAdapter::new(profile(""));
        let pub_key = wallet.pub_key();
        let raw = adapter
            .sign(&wallet, &ctx(&pub_key), &[claim()], "", &fee())
            .await
            .unwrap();
        assert_eq!(raw.signatures.len(), 1);
        assert_eq!(raw.signatures[0].len(), 64);
        assert_eq!(signed_mode(&raw), SignMode::LegacyAminoJson as i32);
    }

    #[tokio::test]
    async fn failed_conversion_falls_through_to_direct() {
        let wallet = LocalWallet::random(&mut rand::thread_rng());
        let mut profile = profile("");
        profile.authz_amino_support = false;
        let adapter = SigningAdapter::new(profile);

        let msgs = execute_on_behalf("cosmos1operator", "cosmos1user", vec![claim()]);
        let pub_key = wallet.pub_key();
        let raw = adapter
            .sign(&wallet, &ctx(&pub_key), &msgs, "", &fee())
            .await
            .unwrap();
        assert_eq!(signed_mode(&raw), SignMode::Direct as i32);
    }

    #[tokio::test]
    async fn amino_only_signer_surfaces_the_conversion_error() {
        let device = HardwareRestricted::new(LocalWallet::random(&mut rand::thread_rng()));
        let mut profile = profile("");
        profile.authz_amino_support = false;
        let adapter = SigningAdapter::new(profile);

        let msgs = execute_on_behalf("cosmos1operator", "cosmos1user", vec![claim()]);
        let pub_key = device.inner().pub_key();
        let err = adapter
            .sign(&device, &ctx(&pub_key), &msgs, "", &fee())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SignError::Adapter(AdapterError::AuthzAminoUnsupported)
        ));
    }

    #[tokio::test]
    async fn typed_data_chains_require_eip712_capable_hardware() {
        let device = HardwareRestricted::new(LocalWallet::random(&mut rand::thread_rng()));
        let adapter = SigningAdapter::new(profile("injective"));
        let pub_key = device.inner().pub_key();
        let err = adapter
            .sign(&device, &ctx(&pub_key), &[claim()], "", &fee())
            .await
            .unwrap_err();
        assert!(matches!(err, SignError::Adapter(AdapterError::NoSigningMethod)));
    }

    #[tokio::test]
    async fn simulate_tx_has_placeholder_signature_and_unspecified_mode() {
        let wallet = LocalWallet::random(&mut rand::thread_rng());
        let adapter = SigningAdapter::new(profile(""));
        let pub_key = wallet.pub_key();
        let raw = adapter.simulate_tx(&ctx(&pub_key), &[claim()], "", &fee());
        assert_eq!(raw.signatures, vec![Vec::<u8>::new()]);
        assert_eq!(signed_mode(&raw), SignMode::Unspecified as i32);
    }

    #[tokio::test]
    async fn signed_body_reflects_wallet_mutated_memo() {
        // LocalWallet echoes the doc back unchanged, so the body built
        // from the signed memo matches the requested one
        let wallet = LocalWallet::random(&mut rand::thread_rng());
        let adapter = SigningAdapter::new(profile(""));
        let pub_key = wallet.pub_key();
        let raw = adapter
            .sign(&wallet, &ctx(&pub_key), &[claim()], "autostake", &fee())
            .await
            .unwrap();
        let body = TxBody::decode(raw.body_bytes.as_slice()).unwrap();
        assert_eq!(body.memo, "autostake");
    }
}
