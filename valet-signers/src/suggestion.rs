//! Chain registration payloads for wallets that do not know a chain yet.
//!
//! The shape follows the de-facto `experimentalSuggestChain` schema; field
//! names serialize in camelCase for the wallet boundary.

use serde::{Deserialize, Serialize};

use valet_core::chain::ChainProfile;
use valet_core::types::GAS_PRICE_FRACTIONAL_DIGITS;

/// A currency the wallet should display for the chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u32,
}

/// Gas price bounds the wallet offers the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

/// A fee currency with its gas price bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    pub gas_price_step: GasPriceStep,
}

/// Bech32 prefixes for every address role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_owned(),
            bech32_prefix_acc_pub: format!("{prefix}pub"),
            bech32_prefix_val_addr: format!("{prefix}valoper"),
            bech32_prefix_val_pub: format!("{prefix}valoperpub"),
            bech32_prefix_cons_addr: format!("{prefix}valcons"),
            bech32_prefix_cons_pub: format!("{prefix}valconspub"),
        }
    }
}

/// HD derivation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

/// The full registration payload for an unknown chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSuggestion {
    pub rpc: String,
    pub rest: String,
    pub chain_id: String,
    pub chain_name: String,
    pub stake_currency: Currency,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<FeeCurrency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl ChainSuggestion {
    /// Builds the payload from a chain profile. EVM-keyed chains
    /// (coin type 60) advertise the Ethereum signing features.
    pub fn from_profile(profile: &ChainProfile) -> Self {
        let currency = Currency {
            coin_denom: profile.symbol.clone(),
            coin_minimal_denom: profile.denom.clone(),
            coin_decimals: profile.decimals,
        };
        let price = profile.gas_price.atomics as f64
            / 10f64.powi(GAS_PRICE_FRACTIONAL_DIGITS as i32);
        let features = if profile.slip44 == 60 {
            vec![
                "ibc-transfer".to_owned(),
                "ibc-go".to_owned(),
                "eth-address-gen".to_owned(),
                "eth-key-sign".to_owned(),
            ]
        } else {
            Vec::new()
        };
        Self {
            rpc: profile.rpc_url.clone(),
            rest: profile.rest_url.clone(),
            chain_id: profile.chain_id.clone(),
            chain_name: profile.pretty_name.clone(),
            stake_currency: currency.clone(),
            bip44: Bip44 { coin_type: profile.slip44 },
            bech32_config: Bech32Config::from_prefix(&profile.prefix),
            currencies: vec![currency.clone()],
            fee_currencies: vec![FeeCurrency {
                currency,
                gas_price_step: GasPriceStep {
                    low: price / 2.0,
                    average: price,
                    high: price * 2.0,
                },
            }],
            features,
        }
    }
}
