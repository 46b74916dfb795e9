//! Per-chain capability profiles.
//!
//! A [`ChainProfile`] captures everything about a ledger that changes how a
//! transaction is encoded or routed: Amino conversion rules for
//! authorization messages, the address prefix, default gas pricing, API
//! version quirks and the adapter the chain needs.

use std::collections::HashMap;
use std::time::Duration;

use crate::types::GasPrice;

/// Default multiplier applied to simulated gas before it becomes a limit.
pub const DEFAULT_GAS_MODIFIER: f64 = 1.5;

/// Default wall-clock budget for confirmation polling.
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-module REST API versions, defaulting to `v1beta1`.
///
/// Chains running cosmos-sdk 0.46 or later serve gov under `v1`; anything
/// else can be overridden per chain.
#[derive(Clone, Debug, Default)]
pub struct ApiVersions(HashMap<String, String>);

impl ApiVersions {
    /// Returns the version for a module, defaulting to `v1beta1`.
    pub fn get(&self, module: &str) -> &str {
        self.0.get(module).map(String::as_str).unwrap_or("v1beta1")
    }

    /// Overrides the version for one module.
    pub fn set(&mut self, module: impl Into<String>, version: impl Into<String>) {
        self.0.insert(module.into(), version.into());
    }
}

/// Static description of a ledger's signing-relevant capabilities.
#[derive(Clone, Debug)]
pub struct ChainProfile {
    /// Chain identifier, e.g. `cosmoshub-4`.
    pub chain_id: String,
    /// Adapter key; selects per-chain overrides (`osmosis`, `injective`, ...).
    pub path: String,
    /// Human-readable name, used in chain suggestion payloads.
    pub pretty_name: String,
    /// Bech32 account prefix.
    pub prefix: String,
    /// Base staking denomination.
    pub denom: String,
    /// Display symbol for the base denomination.
    pub symbol: String,
    /// Display decimals for the base denomination.
    pub decimals: u32,
    /// BIP-44 coin type; 60 implies an EVM-compatible key scheme.
    pub slip44: u32,
    /// Whether the chain uses ethermint-style keys. Defaults from slip44.
    pub ethermint: bool,
    /// REST endpoint the provider talks to.
    pub rest_url: String,
    /// RPC endpoint, only used in chain suggestion payloads.
    pub rpc_url: String,
    /// Default gas price when the caller does not supply one.
    pub gas_price: GasPrice,
    /// Multiplier applied to simulated gas.
    pub gas_modifier: f64,
    /// Wall-clock budget for confirmation polling.
    pub tx_timeout: Duration,
    /// Whether the chain supports authz at all.
    pub authz_support: bool,
    /// Whether authorization messages may be converted to Amino JSON.
    pub authz_amino_support: bool,
    /// Whether only generic (not scoped) authorization converts cleanly.
    pub authz_amino_generic_only: bool,
    /// Whether grant/revoke Amino payloads must be "lifted" one nesting
    /// level from the canonical shape.
    pub authz_amino_lifted_values: bool,
    /// Inner message types that may not appear in an Amino-converted Exec.
    pub authz_amino_exec_prevent_types: Vec<String>,
    /// Message types excluded from Amino conversion entirely.
    pub amino_prevent_types: Vec<String>,
    /// Per-module REST API versions.
    pub api_versions: ApiVersions,
}

impl ChainProfile {
    /// Creates a profile with permissive defaults: full authz Amino
    /// support, 1.5x gas headroom and a 60 second confirmation budget.
    pub fn new(
        chain_id: impl Into<String>,
        prefix: impl Into<String>,
        denom: impl Into<String>,
        gas_price: GasPrice,
    ) -> Self {
        let prefix = prefix.into();
        let denom = denom.into();
        Self {
            chain_id: chain_id.into(),
            path: String::new(),
            pretty_name: String::new(),
            symbol: denom.trim_start_matches('u').to_uppercase(),
            decimals: 6,
            slip44: 118,
            ethermint: false,
            rest_url: String::new(),
            rpc_url: String::new(),
            gas_price,
            gas_modifier: DEFAULT_GAS_MODIFIER,
            tx_timeout: DEFAULT_TX_TIMEOUT,
            authz_support: true,
            authz_amino_support: true,
            authz_amino_generic_only: false,
            authz_amino_lifted_values: false,
            authz_amino_exec_prevent_types: Vec::new(),
            amino_prevent_types: Vec::new(),
            api_versions: ApiVersions::default(),
            prefix,
            denom,
        }
    }

    /// Sets the adapter key.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the BIP-44 coin type, deriving the ethermint flag.
    pub fn with_slip44(mut self, slip44: u32) -> Self {
        self.slip44 = slip44;
        self.ethermint = slip44 == 60;
        self
    }

    /// Applies the capability defaults for a given cosmos-sdk version:
    /// chains before 0.46 only convert generic authorization to Amino and
    /// require lifted grant/revoke payloads; 0.46+ serves gov under `v1`.
    pub fn with_sdk_version(mut self, version: &str) -> Self {
        let sdk46_or_later = version_at_least(version, (0, 46));
        self.authz_amino_generic_only = self.authz_amino_support && !sdk46_or_later;
        self.authz_amino_lifted_values = self.authz_amino_generic_only;
        if sdk46_or_later {
            self.api_versions.set("gov", "v1");
        }
        self
    }
}

fn version_at_least(version: &str, (maj, min): (u32, u32)) -> bool {
    let mut parts = version.trim_start_matches('v').split('.');
    let major: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor) >= (maj, min)
}
