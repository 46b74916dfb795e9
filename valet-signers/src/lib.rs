//! Signer backends for Cosmos-style transactions.
//!
//! A [`SignerProvider`] is anything that can hold a key and produce a
//! signature over one of the supported sign documents. Implement the trait
//! to add further backends such as HSMs or custodial services.
//!
//! Supported signers:
//! - In-memory secp256k1 key ([`LocalWallet`])
//! - Hardware capability wrapper ([`HardwareRestricted`])
//! - Extension/mobile wallet bridge ([`BridgeSigner`])

#![deny(unsafe_code)]

mod bridge;
mod hardware;
mod suggestion;
mod wallet;

pub use bridge::{BridgeError, BridgeSigner, BridgeTransport};
pub use hardware::HardwareRestricted;
pub use suggestion::{Bech32Config, Bip44, ChainSuggestion, Currency, FeeCurrency, GasPriceStep};
pub use wallet::{bech32_address, LocalWallet, WalletError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use valet_core::chain::ChainProfile;
use valet_core::eip712::TypedData;
use valet_core::proto::tx::SignDoc;
use valet_core::StdSignDoc;

/// What a connected signer is able to do.
///
/// Hardware devices never parse opaque protobuf, so `is_hardware` implies
/// `sign_direct == false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SigningCapabilities {
    pub sign_direct: bool,
    pub sign_amino: bool,
    pub sign_eip712: bool,
    pub is_hardware: bool,
}

impl SigningCapabilities {
    /// Capabilities of an ordinary software key.
    pub fn software() -> Self {
        Self { sign_direct: true, sign_amino: true, sign_eip712: false, is_hardware: false }
    }

    /// Restricts to what a hardware device can display and sign.
    pub fn restrict_to_hardware(self) -> Self {
        Self { sign_direct: false, sign_amino: self.sign_amino, ..self }.with_hardware()
    }

    fn with_hardware(mut self) -> Self {
        self.is_hardware = true;
        self
    }
}

/// The key a provider exposes for a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Wallet-assigned label, if the backend has one.
    pub name: Option<String>,
    /// Bech32 account address.
    pub address: String,
    /// Compressed secp256k1 public key.
    #[serde(with = "pubkey_base64")]
    pub pub_key: Vec<u8>,
    /// Whether the key lives on a hardware device.
    #[serde(default)]
    pub is_hardware: bool,
}

mod pubkey_base64 {
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(serde::de::Error::custom)
    }
}

/// Result of a protobuf direct signature. `signed` is returned because the
/// wallet may have mutated the fee or memo before signing.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectSignResponse {
    pub signed: SignDoc,
    /// 64-byte r || s signature over sha256 of the sign doc.
    pub signature: Vec<u8>,
}

/// Result of an Amino (or EIP-712 via Amino) signature.
#[derive(Clone, Debug, PartialEq)]
pub struct AminoSignResponse {
    pub signed: StdSignDoc,
    /// 64-byte r || s signature.
    pub signature: Vec<u8>,
}

/// Raised when a sign mode is requested that the backend cannot perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum UnsupportedSignMode {
    #[error("signer does not support direct protobuf signing")]
    Direct,
    #[error("signer does not support amino signing")]
    Amino,
    #[error("signer does not support eip712 signing")]
    Eip712,
}

/// A backend that holds keys and signs transactions.
///
/// Implementations are expected to be cheap to share (`&self` methods
/// only); session state such as grants lives above this trait.
#[async_trait]
pub trait SignerProvider: std::fmt::Debug + Send + Sync {
    type Error: std::error::Error + Send + Sync + From<UnsupportedSignMode>;

    /// Asks the backend to unlock the chain for this origin.
    async fn enable(&self, chain_id: &str) -> Result<(), Self::Error>;

    /// Registers an unknown chain with the backend.
    async fn suggest_chain(&self, suggestion: &ChainSuggestion) -> Result<(), Self::Error>;

    /// The key the backend exposes for the chain.
    async fn key(&self, chain_id: &str) -> Result<Key, Self::Error>;

    /// What this backend can sign. Re-queried on every connect; bridges
    /// may report different capabilities per session.
    fn capabilities(&self) -> SigningCapabilities;

    /// Signs a protobuf `SignDoc`.
    async fn sign_direct(
        &self,
        chain_id: &str,
        signer: &str,
        doc: SignDoc,
    ) -> Result<DirectSignResponse, Self::Error>;

    /// Signs a legacy Amino sign doc.
    async fn sign_amino(
        &self,
        chain_id: &str,
        signer: &str,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error>;

    /// Signs EIP-712 typed data derived from an Amino sign doc. Backends
    /// without an Ethereum signing path keep the default rejection.
    async fn sign_eip712(
        &self,
        chain_id: &str,
        signer: &str,
        typed_data: TypedData,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error> {
        let _ = (chain_id, signer, typed_data, doc);
        Err(UnsupportedSignMode::Eip712.into())
    }

    /// Two-phase connect: enable and fetch the key; when that fails,
    /// suggest the chain's metadata and retry once. A failed suggestion
    /// surfaces the original enable error, not the suggestion's.
    async fn connect(&self, profile: &ChainProfile) -> Result<Key, Self::Error> {
        let first = match self.enable(&profile.chain_id).await {
            Ok(()) => match self.key(&profile.chain_id).await {
                Ok(key) => return Ok(key),
                Err(err) => err,
            },
            Err(err) => err,
        };
        tracing::debug!(chain_id = %profile.chain_id, error = %first, "enable failed, suggesting chain");
        if let Err(err) = self.suggest_chain(&ChainSuggestion::from_profile(profile)).await {
            tracing::debug!(chain_id = %profile.chain_id, error = %err, "chain suggestion rejected");
            return Err(first);
        }
        self.enable(&profile.chain_id).await?;
        self.key(&profile.chain_id).await
    }
}
