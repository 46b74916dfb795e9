//! Typed queries over a raw REST transport.

use base64::Engine as _;
use serde_json::{json, Value};

use valet_core::authz::Grant;
use valet_core::chain::ApiVersions;

use crate::pending::PendingTx;
use crate::{ProviderError, RestClient};

/// The fields of an on-chain account the signing flow needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
    /// The account-reported public key type URL, when the account has
    /// transacted before. Overrides any chain-level key scheme guess.
    pub pub_key_type_url: Option<String>,
}

/// The latest block, reduced to what callers consume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub height: u64,
    pub chain_id: String,
}

/// Result of a broadcast or transaction lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxResult {
    pub txhash: String,
    pub code: u32,
    pub height: u64,
    pub raw_log: String,
    pub gas_wanted: u64,
    pub gas_used: u64,
}

/// A REST endpoint with the typed query surface.
#[derive(Clone, Debug)]
pub struct Provider<C> {
    client: C,
    api_versions: ApiVersions,
}

impl<C: RestClient> Provider<C> {
    /// Wraps a transport with default API versions (`v1beta1` everywhere).
    pub fn new(client: C) -> Self {
        Self { client, api_versions: ApiVersions::default() }
    }

    /// Overrides per-module API versions (e.g. gov `v1` on newer chains).
    pub fn with_api_versions(mut self, api_versions: ApiVersions) -> Self {
        self.api_versions = api_versions;
        self
    }

    /// The underlying transport.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn api_path(&self, module: &str, path: &str) -> String {
        let version = self.api_versions.get(module);
        format!("/cosmos/{module}/{version}/{path}")
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ProviderError> {
        self.client.get(path, query).await.map_err(ProviderError::from_rest)
    }

    /// Fetches an account, unwrapping the embedded base account shapes
    /// chains wrap it in (ethermint, vesting, nested custom accounts).
    pub async fn account(&self, address: &str) -> Result<Account, ProviderError> {
        let path = self.api_path("auth", &format!("accounts/{address}"));
        let response = match self.client.get(&path, &[]).await {
            Ok(response) => response,
            Err(err) if crate::RestError::status(&err) == Some(404) => {
                return Err(ProviderError::AccountNotFound(address.to_owned()))
            }
            Err(err) => return Err(ProviderError::from_rest(err)),
        };
        let account = response
            .get("account")
            .map(unwrap_account)
            .ok_or(ProviderError::MalformedResponse("account query"))?;
        Ok(Account {
            address: account
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or(address)
                .to_owned(),
            account_number: lenient_u64(account.get("account_number"))
                .ok_or(ProviderError::MalformedResponse("account number"))?,
            sequence: lenient_u64(account.get("sequence")).unwrap_or(0),
            pub_key_type_url: account
                .pointer("/pub_key/@type")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    /// The chain's latest block. Nodes that predate the tendermint query
    /// service answer 501; those get the legacy `/blocks/latest` path.
    pub async fn latest_block(&self) -> Result<Block, ProviderError> {
        let path = self.api_path("base/tendermint", "blocks/latest");
        let response = match self.get(&path, &[]).await {
            Ok(response) => response,
            Err(ProviderError::UnsupportedQuery) => self.get("/blocks/latest", &[]).await?,
            Err(err) => return Err(err),
        };
        let header = response
            .pointer("/block/header")
            .ok_or(ProviderError::MalformedResponse("latest block"))?;
        Ok(Block {
            height: lenient_u64(header.get("height"))
                .ok_or(ProviderError::MalformedResponse("block height"))?,
            chain_id: header
                .get("chain_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        })
    }

    /// Simulates an encoded transaction and returns the gas it used.
    /// Failures carry the node's message verbatim; callers must not
    /// substitute a default fee for a failed simulation.
    pub async fn simulate(&self, tx_bytes: &[u8]) -> Result<u64, ProviderError> {
        let path = self.api_path("tx", "simulate");
        let body = json!({
            "tx_bytes": base64::engine::general_purpose::STANDARD.encode(tx_bytes),
        });
        let response = self.client.post(&path, &body).await.map_err(|err| {
            let message = crate::RestError::remote_message(&err)
                .map(str::to_owned)
                .unwrap_or_else(|| err.to_string());
            ProviderError::SimulationFailed(message)
        })?;
        lenient_u64(response.pointer("/gas_info/gas_used"))
            .ok_or(ProviderError::MalformedResponse("simulate"))
    }

    /// Broadcasts in sync mode: the node checks the transaction and
    /// returns its hash without waiting for inclusion.
    pub async fn broadcast_sync(&self, tx_bytes: &[u8]) -> Result<TxResult, ProviderError> {
        let path = self.api_path("tx", "txs");
        let body = json!({
            "tx_bytes": base64::engine::general_purpose::STANDARD.encode(tx_bytes),
            "mode": "BROADCAST_MODE_SYNC",
        });
        let response =
            self.client.post(&path, &body).await.map_err(ProviderError::from_rest)?;
        let result = parse_tx_result(response.get("tx_response"))
            .ok_or(ProviderError::MalformedResponse("broadcast"))?;
        if result.code != 0 {
            return Err(ProviderError::BroadcastRejected {
                code: result.code,
                raw_log: result.raw_log,
            });
        }
        Ok(result)
    }

    /// Broadcasts and returns a handle that polls for confirmation.
    pub async fn broadcast(&self, tx_bytes: &[u8]) -> Result<PendingTx<'_, C>, ProviderError> {
        let result = self.broadcast_sync(tx_bytes).await?;
        Ok(PendingTx::new(result.txhash, self))
    }

    /// Looks up a transaction by hash.
    pub async fn tx(&self, hash: &str) -> Result<TxResult, ProviderError> {
        let path = self.api_path("tx", &format!("txs/{hash}"));
        let response = self.get(&path, &[]).await?;
        parse_tx_result(response.get("tx_response"))
            .ok_or(ProviderError::MalformedResponse("tx query"))
    }

    /// Grants for one (grantee, granter) pair. The single-pair endpoint
    /// omits the addresses from each item, so they are filled back in.
    pub async fn grants(&self, grantee: &str, granter: &str) -> Result<Vec<Grant>, ProviderError> {
        let path = self.api_path("authz", "grants");
        let items = self
            .all_pages(&path, &[("grantee", grantee), ("granter", granter)])
            .await?;
        items
            .into_iter()
            .map(|mut item| {
                if let Some(fields) = item.as_object_mut() {
                    fields.entry("grantee").or_insert_with(|| json!(grantee));
                    fields.entry("granter").or_insert_with(|| json!(granter));
                }
                Ok(serde_json::from_value(item)?)
            })
            .collect()
    }

    /// All grants where `grantee` is the grantee.
    pub async fn grantee_grants(&self, grantee: &str) -> Result<Vec<Grant>, ProviderError> {
        let path = self.api_path("authz", &format!("grants/grantee/{grantee}"));
        self.collect_grant_pages(&path).await
    }

    /// All grants issued by `granter`.
    pub async fn granter_grants(&self, granter: &str) -> Result<Vec<Grant>, ProviderError> {
        let path = self.api_path("authz", &format!("grants/granter/{granter}"));
        self.collect_grant_pages(&path).await
    }

    async fn collect_grant_pages(&self, path: &str) -> Result<Vec<Grant>, ProviderError> {
        self.all_pages(path, &[])
            .await?
            .into_iter()
            .map(|item| Ok(serde_json::from_value(item)?))
            .collect()
    }

    /// Follows `pagination.next_key` until the listing is exhausted,
    /// returning the concatenated `grants` arrays.
    async fn all_pages(
        &self,
        path: &str,
        base_query: &[(&str, &str)],
    ) -> Result<Vec<Value>, ProviderError> {
        let mut items = Vec::new();
        let mut next_key: Option<String> = None;
        loop {
            let mut query: Vec<(&str, &str)> = base_query.to_vec();
            query.push(("pagination.limit", "100"));
            if let Some(key) = &next_key {
                query.push(("pagination.key", key));
            }
            let page = self.get(path, &query).await?;
            if let Some(grants) = page.get("grants").and_then(Value::as_array) {
                items.extend(grants.iter().cloned());
            }
            next_key = page
                .pointer("/pagination/next_key")
                .and_then(Value::as_str)
                .filter(|key| !key.is_empty())
                .map(str::to_owned);
            if next_key.is_none() {
                return Ok(items);
            }
        }
    }
}

/// Peels the wrapper shapes chains embed the base account in, trying all
/// the historical field casings.
fn unwrap_account(account: &Value) -> &Value {
    let mut value = account;
    if let Some(base) = field_any_case(value, "base_account") {
        value = base;
    }
    if let Some(vesting) = field_any_case(value, "base_vesting_account") {
        value = vesting;
        if let Some(base) = field_any_case(value, "base_account") {
            value = base;
        }
    }
    if let Some(nested) = value.get("account") {
        value = nested;
    }
    value
}

fn field_any_case<'a>(value: &'a Value, snake: &str) -> Option<&'a Value> {
    let pascal: String = snake
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    let camel = {
        let mut chars = pascal.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    };
    value
        .get(&pascal)
        .or_else(|| value.get(&camel))
        .or_else(|| value.get(snake))
}

/// Accepts both the stringified and numeric renderings LCDs produce.
fn lenient_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::String(text) => text.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

fn parse_tx_result(response: Option<&Value>) -> Option<TxResult> {
    let response = response?;
    Some(TxResult {
        txhash: response.get("txhash")?.as_str()?.to_owned(),
        code: lenient_u64(response.get("code")).unwrap_or(0) as u32,
        height: lenient_u64(response.get("height")).unwrap_or(0),
        raw_log: response
            .get("raw_log")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        gas_wanted: lenient_u64(response.get("gas_wanted")).unwrap_or(0),
        gas_used: lenient_u64(response.get("gas_used")).unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClient, MockError};

    const ACCOUNT_PATH: &str = "/cosmos/auth/v1beta1/accounts/cosmos1user";

    #[tokio::test]
    async fn account_parses_a_plain_base_account() {
        let client = MockClient::new().respond(
            ACCOUNT_PATH,
            json!({ "account": {
                "@type": "/cosmos.auth.v1beta1.BaseAccount",
                "address": "cosmos1user",
                "pub_key": { "@type": "/cosmos.crypto.secp256k1.PubKey", "key": "AAo=" },
                "account_number": "42",
                "sequence": "7",
            }}),
        );
        let account = Provider::new(client).account("cosmos1user").await.unwrap();
        assert_eq!(account.account_number, 42);
        assert_eq!(account.sequence, 7);
        assert_eq!(
            account.pub_key_type_url.as_deref(),
            Some("/cosmos.crypto.secp256k1.PubKey")
        );
    }

    #[tokio::test]
    async fn account_unwraps_ethermint_and_vesting_shapes() {
        let client = MockClient::new().respond(
            ACCOUNT_PATH,
            json!({ "account": {
                "@type": "/ethermint.types.v1.EthAccount",
                "base_account": {
                    "BaseVestingAccount": {
                        "baseAccount": {
                            "address": "cosmos1user",
                            "account_number": "9",
                            "sequence": "1",
                        },
                    },
                },
            }}),
        );
        let account = Provider::new(client).account("cosmos1user").await.unwrap();
        assert_eq!(account.account_number, 9);
        assert_eq!(account.sequence, 1);
    }

    #[tokio::test]
    async fn missing_account_is_a_distinct_error() {
        let client =
            MockClient::new().fail(ACCOUNT_PATH, MockError::status(404, "not found"));
        let err = Provider::new(client).account("cosmos1user").await.unwrap_err();
        assert!(matches!(err, ProviderError::AccountNotFound(addr) if addr == "cosmos1user"));
    }

    #[tokio::test]
    async fn latest_block_falls_back_to_legacy_path_on_501() {
        let client = MockClient::new()
            .fail(
                "/cosmos/base/tendermint/v1beta1/blocks/latest",
                MockError::status(501, "not implemented"),
            )
            .respond(
                "/blocks/latest",
                json!({ "block": { "header": { "height": "123456", "chain_id": "cosmoshub-4" } } }),
            );
        let block = Provider::new(client).latest_block().await.unwrap();
        assert_eq!(block.height, 123_456);
        assert_eq!(block.chain_id, "cosmoshub-4");
    }

    #[tokio::test]
    async fn simulate_surfaces_the_remote_message_verbatim() {
        let client = MockClient::new().fail(
            "/cosmos/tx/v1beta1/simulate",
            MockError::status(400, "out of gas in location: ReadFlat"),
        );
        let err = Provider::new(client).simulate(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::SimulationFailed(msg) if msg == "out of gas in location: ReadFlat"
        ));
    }

    #[tokio::test]
    async fn simulate_parses_gas_used() {
        let client = MockClient::new().respond(
            "/cosmos/tx/v1beta1/simulate",
            json!({ "gas_info": { "gas_wanted": "100000", "gas_used": "83214" } }),
        );
        let gas = Provider::new(client).simulate(&[1]).await.unwrap();
        assert_eq!(gas, 83_214);
    }

    #[tokio::test]
    async fn rejected_broadcast_carries_the_raw_log() {
        let client = MockClient::new().respond(
            "/cosmos/tx/v1beta1/txs",
            json!({ "tx_response": {
                "txhash": "AB12",
                "code": 13,
                "raw_log": "insufficient fee",
                "height": "0",
            }}),
        );
        let err = Provider::new(client).broadcast_sync(&[1]).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::BroadcastRejected { code: 13, raw_log } if raw_log == "insufficient fee"
        ));
    }

    #[tokio::test]
    async fn grants_follow_pagination_and_fill_addresses() {
        let path = "/cosmos/authz/v1beta1/grants";
        let client = MockClient::new()
            .respond(
                path,
                json!({
                    "grants": [{
                        "authorization": {
                            "@type": "/cosmos.authz.v1beta1.GenericAuthorization",
                            "msg": "/cosmos.staking.v1beta1.MsgDelegate",
                        },
                        "expiration": "2027-01-01T00:00:00Z",
                    }],
                    "pagination": { "next_key": "abc" },
                }),
            )
            .respond(
                path,
                json!({
                    "grants": [{
                        "authorization": {
                            "@type": "/cosmos.authz.v1beta1.GenericAuthorization",
                            "msg": "/cosmos.gov.v1beta1.MsgVote",
                        },
                    }],
                    "pagination": { "next_key": null },
                }),
            );
        let grants = Provider::new(client)
            .grants("cosmos1operator", "cosmos1user")
            .await
            .unwrap();
        assert_eq!(grants.len(), 2);
        assert!(grants.iter().all(|g| g.grantee == "cosmos1operator"));
        assert!(grants.iter().all(|g| g.granter == "cosmos1user"));
        assert_eq!(
            grants[0].generic_msg_type_url(),
            Some("/cosmos.staking.v1beta1.MsgDelegate")
        );
        assert!(grants[0].expiration.is_some());
        assert!(grants[1].expiration.is_none());
    }

    #[tokio::test]
    async fn gov_module_version_is_overridable() {
        let mut versions = ApiVersions::default();
        versions.set("gov", "v1");
        let provider = Provider::new(MockClient::new()).with_api_versions(versions);
        assert_eq!(
            provider.api_path("gov", "proposals"),
            "/cosmos/gov/v1/proposals"
        );
        assert_eq!(
            provider.api_path("authz", "grants"),
            "/cosmos/authz/v1beta1/grants"
        );
    }
}
