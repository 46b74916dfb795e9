//! An in-memory secp256k1 wallet.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bech32::{ToBase32, Variant};
use k256::ecdsa::signature::DigestSigner;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::ecdsa::{Signature, SigningKey};
use prost::Message as _;
use rand::{CryptoRng, Rng};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use thiserror::Error;

use valet_core::chain::ChainProfile;
use valet_core::proto::tx::SignDoc;
use valet_core::StdSignDoc;

use crate::{
    AminoSignResponse, ChainSuggestion, DirectSignResponse, Key, SignerProvider,
    SigningCapabilities, UnsupportedSignMode,
};

/// Errors produced by [`LocalWallet`].
#[derive(Debug, Error)]
pub enum WalletError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSignMode),
    #[error(transparent)]
    Ecdsa(#[from] k256::ecdsa::Error),
    #[error(transparent)]
    Bech32(#[from] bech32::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    /// The hex private key string could not be decoded.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

/// Derives the bech32 account address for a compressed secp256k1 key:
/// `bech32(prefix, ripemd160(sha256(pubkey)))`.
pub fn bech32_address(prefix: &str, compressed_pubkey: &[u8]) -> Result<String, bech32::Error> {
    let hash = Ripemd160::digest(Sha256::digest(compressed_pubkey));
    bech32::encode(prefix, hash.to_base32(), Variant::Bech32)
}

/// A wallet holding a raw secp256k1 private key.
///
/// Signs both direct and Amino documents; it has no display, so the
/// hardware constraints do not apply. Never log or serialize this type's
/// key material.
#[derive(Clone)]
pub struct LocalWallet {
    signer: SigningKey,
    prefix: String,
    name: Option<String>,
}

impl LocalWallet {
    /// Wraps an existing signing key, using the `cosmos` address prefix.
    pub fn new(signer: SigningKey) -> Self {
        Self { signer, prefix: "cosmos".to_owned(), name: None }
    }

    /// Generates a wallet with a random key.
    pub fn random<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self::new(SigningKey::random(rng))
    }

    /// Builds a wallet from raw private key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        Ok(Self::new(SigningKey::from_bytes(bytes)?))
    }

    /// Sets the bech32 prefix used when deriving the account address.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the display name reported with the key.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The compressed public key.
    pub fn pub_key(&self) -> Vec<u8> {
        self.signer.verifying_key().to_encoded_point(true).as_bytes().to_vec()
    }

    /// The bech32 account address under the configured prefix.
    pub fn address(&self) -> Result<String, WalletError> {
        Ok(bech32_address(&self.prefix, &self.pub_key())?)
    }

    /// Signs sha256(bytes), returning the low-s 64-byte r || s form.
    fn sign_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, WalletError> {
        let digest = Sha256::new_with_prefix(bytes);
        let signature: Signature = self.signer.try_sign_digest(digest)?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.as_ref().to_vec())
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("prefix", &self.prefix)
            .field("name", &self.name)
            .finish()
    }
}

impl FromStr for LocalWallet {
    type Err = WalletError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(src.strip_prefix("0x").unwrap_or(src))?;
        Self::from_bytes(&bytes)
    }
}

#[async_trait]
impl SignerProvider for LocalWallet {
    type Error = WalletError;

    async fn enable(&self, _chain_id: &str) -> Result<(), WalletError> {
        Ok(())
    }

    async fn suggest_chain(&self, _suggestion: &ChainSuggestion) -> Result<(), WalletError> {
        Ok(())
    }

    async fn key(&self, _chain_id: &str) -> Result<Key, WalletError> {
        Ok(Key {
            name: self.name.clone(),
            address: self.address()?,
            pub_key: self.pub_key(),
            is_hardware: false,
        })
    }

    fn capabilities(&self) -> SigningCapabilities {
        SigningCapabilities::software()
    }

    async fn sign_direct(
        &self,
        _chain_id: &str,
        _signer: &str,
        doc: SignDoc,
    ) -> Result<DirectSignResponse, WalletError> {
        let signature = self.sign_bytes(&doc.encode_to_vec())?;
        Ok(DirectSignResponse { signed: doc, signature })
    }

    async fn sign_amino(
        &self,
        _chain_id: &str,
        _signer: &str,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, WalletError> {
        let signature = self.sign_bytes(&doc.sign_bytes()?)?;
        Ok(AminoSignResponse { signed: doc, signature })
    }

    /// Connect never needs a suggestion for a key we hold locally.
    async fn connect(&self, profile: &ChainProfile) -> Result<Key, WalletError> {
        self.key(&profile.chain_id).await
    }
}
