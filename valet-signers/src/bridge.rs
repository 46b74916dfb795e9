//! Request/response bridge to an out-of-process wallet.
//!
//! Extension and mobile wallets expose a message channel rather than an
//! in-process API. [`BridgeSigner`] speaks a small JSON method protocol
//! over any [`BridgeTransport`]; capabilities come from the backend's
//! handshake, so one bridge type covers software and hardware sessions.

use async_trait::async_trait;
use base64::Engine as _;
use serde_json::{json, Value};
use thiserror::Error;

use valet_core::chain::ChainProfile;
use valet_core::eip712::TypedData;
use valet_core::proto::tx::SignDoc;
use valet_core::StdSignDoc;

use crate::{
    AminoSignResponse, ChainSuggestion, DirectSignResponse, Key, SignerProvider,
    SigningCapabilities, UnsupportedSignMode,
};

/// A duplex channel to the wallet backend.
#[async_trait]
pub trait BridgeTransport: std::fmt::Debug + Send + Sync {
    type Error: std::error::Error + Send + Sync;

    /// Sends one request and waits for its response.
    async fn request(&self, method: &str, params: Value) -> Result<Value, Self::Error>;
}

/// Errors from a bridged wallet session.
#[derive(Debug, Error)]
pub enum BridgeError<E: std::error::Error + Send + Sync> {
    #[error(transparent)]
    Transport(E),
    /// The backend answered but the payload did not have the agreed shape.
    #[error("malformed {0} response from wallet backend")]
    Malformed(&'static str),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSignMode),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// A signer living behind a [`BridgeTransport`].
#[derive(Debug)]
pub struct BridgeSigner<T: BridgeTransport> {
    transport: T,
    capabilities: SigningCapabilities,
}

impl<T: BridgeTransport> BridgeSigner<T> {
    /// Opens the session and queries what the backend can sign.
    pub async fn handshake(transport: T) -> Result<Self, BridgeError<T::Error>> {
        let caps = transport
            .request("capabilities", Value::Null)
            .await
            .map_err(BridgeError::Transport)?;
        let flag = |name: &'static str| {
            caps.get(name)
                .and_then(Value::as_bool)
                .ok_or(BridgeError::Malformed("capabilities"))
        };
        let mut capabilities = SigningCapabilities {
            sign_direct: flag("signDirect")?,
            sign_amino: flag("signAmino")?,
            sign_eip712: flag("signEip712")?,
            is_hardware: flag("isHardware")?,
        };
        if capabilities.is_hardware {
            capabilities = capabilities.restrict_to_hardware();
        }
        Ok(Self { transport, capabilities })
    }

    /// Connects while the caller displays a pairing handle (QR code or
    /// deeplink). `show` receives the backend's session URI before the
    /// connect starts; `hide` runs once the connect resolves either way.
    pub async fn connect_with_display<F, G>(
        &self,
        profile: &ChainProfile,
        show: F,
        hide: G,
    ) -> Result<Key, BridgeError<T::Error>>
    where
        F: FnOnce(&str) + Send,
        G: FnOnce() + Send,
    {
        let response = self
            .transport
            .request("session_uri", Value::Null)
            .await
            .map_err(BridgeError::Transport)?;
        let uri = response
            .get("uri")
            .and_then(Value::as_str)
            .ok_or(BridgeError::Malformed("session_uri"))?;
        show(uri);
        let result = self.connect(profile).await;
        hide();
        result
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, BridgeError<T::Error>> {
        self.transport.request(method, params).await.map_err(BridgeError::Transport)
    }

    fn parse_signature(
        response: &Value,
        method: &'static str,
    ) -> Result<Vec<u8>, BridgeError<T::Error>> {
        response
            .get("signature")
            .and_then(Value::as_str)
            .and_then(|text| base64::engine::general_purpose::STANDARD.decode(text).ok())
            .ok_or(BridgeError::Malformed(method))
    }
}

fn sign_doc_to_json(doc: &SignDoc) -> Value {
    let b64 = base64::engine::general_purpose::STANDARD;
    json!({
        "bodyBytes": b64.encode(&doc.body_bytes),
        "authInfoBytes": b64.encode(&doc.auth_info_bytes),
        "chainId": doc.chain_id,
        "accountNumber": doc.account_number.to_string(),
    })
}

fn sign_doc_from_json(value: &Value) -> Option<SignDoc> {
    let b64 = base64::engine::general_purpose::STANDARD;
    Some(SignDoc {
        body_bytes: b64.decode(value.get("bodyBytes")?.as_str()?).ok()?,
        auth_info_bytes: b64.decode(value.get("authInfoBytes")?.as_str()?).ok()?,
        chain_id: value.get("chainId")?.as_str()?.to_owned(),
        account_number: value.get("accountNumber")?.as_str()?.parse().ok()?,
    })
}

#[async_trait]
impl<T: BridgeTransport> SignerProvider for BridgeSigner<T> {
    type Error = BridgeError<T::Error>;

    async fn enable(&self, chain_id: &str) -> Result<(), Self::Error> {
        self.request("enable", json!({ "chainId": chain_id })).await?;
        Ok(())
    }

    async fn suggest_chain(&self, suggestion: &ChainSuggestion) -> Result<(), Self::Error> {
        self.request("suggest_chain", serde_json::to_value(suggestion)?).await?;
        Ok(())
    }

    async fn key(&self, chain_id: &str) -> Result<Key, Self::Error> {
        let response = self.request("get_key", json!({ "chainId": chain_id })).await?;
        let mut key: Key =
            serde_json::from_value(response).map_err(|_| BridgeError::Malformed("get_key"))?;
        key.is_hardware = self.capabilities.is_hardware;
        Ok(key)
    }

    fn capabilities(&self) -> SigningCapabilities {
        self.capabilities
    }

    async fn sign_direct(
        &self,
        chain_id: &str,
        signer: &str,
        doc: SignDoc,
    ) -> Result<DirectSignResponse, Self::Error> {
        if !self.capabilities.sign_direct {
            return Err(UnsupportedSignMode::Direct.into());
        }
        let response = self
            .request(
                "sign_direct",
                json!({
                    "chainId": chain_id,
                    "signer": signer,
                    "signDoc": sign_doc_to_json(&doc),
                }),
            )
            .await?;
        let signed = response
            .get("signed")
            .and_then(sign_doc_from_json)
            .ok_or(BridgeError::Malformed("sign_direct"))?;
        let signature = Self::parse_signature(&response, "sign_direct")?;
        Ok(DirectSignResponse { signed, signature })
    }

    async fn sign_amino(
        &self,
        chain_id: &str,
        signer: &str,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error> {
        if !self.capabilities.sign_amino {
            return Err(UnsupportedSignMode::Amino.into());
        }
        let response = self
            .request(
                "sign_amino",
                json!({ "chainId": chain_id, "signer": signer, "signDoc": doc }),
            )
            .await?;
        let signed = response
            .get("signed")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or(BridgeError::Malformed("sign_amino"))?;
        let signature = Self::parse_signature(&response, "sign_amino")?;
        Ok(AminoSignResponse { signed, signature })
    }

    async fn sign_eip712(
        &self,
        chain_id: &str,
        signer: &str,
        typed_data: TypedData,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error> {
        if !self.capabilities.sign_eip712 {
            return Err(UnsupportedSignMode::Eip712.into());
        }
        let response = self
            .request(
                "sign_eip712",
                json!({
                    "chainId": chain_id,
                    "signer": signer,
                    "typedData": typed_data,
                    "signDoc": doc,
                }),
            )
            .await?;
        let signed = response
            .get("signed")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or(BridgeError::Malformed("sign_eip712"))?;
        let signature = Self::parse_signature(&response, "sign_eip712")?;
        Ok(AminoSignResponse { signed, signature })
    }
}
