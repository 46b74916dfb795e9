//! Capability mask for keys held on hardware devices.

use async_trait::async_trait;

use valet_core::eip712::TypedData;
use valet_core::proto::tx::SignDoc;
use valet_core::StdSignDoc;

use crate::{
    AminoSignResponse, ChainSuggestion, DirectSignResponse, Key, SignerProvider,
    SigningCapabilities, UnsupportedSignMode,
};

/// Wraps any provider whose key lives on a hardware device.
///
/// Devices render the transaction on their own screen and therefore only
/// accept documents they can parse: Amino JSON and, on some firmwares,
/// EIP-712 typed data. Direct protobuf signing is refused regardless of
/// what the inner provider could do.
#[derive(Clone, Debug)]
pub struct HardwareRestricted<S> {
    inner: S,
    eip712: bool,
}

impl<S> HardwareRestricted<S> {
    /// Restricts `inner` to the hardware signing surface.
    pub fn new(inner: S) -> Self {
        Self { inner, eip712: false }
    }

    /// Marks the device firmware as EIP-712 capable.
    pub fn with_eip712(mut self) -> Self {
        self.eip712 = true;
        self
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: SignerProvider> SignerProvider for HardwareRestricted<S> {
    type Error = S::Error;

    async fn enable(&self, chain_id: &str) -> Result<(), Self::Error> {
        self.inner.enable(chain_id).await
    }

    async fn suggest_chain(&self, suggestion: &ChainSuggestion) -> Result<(), Self::Error> {
        self.inner.suggest_chain(suggestion).await
    }

    async fn key(&self, chain_id: &str) -> Result<Key, Self::Error> {
        let mut key = self.inner.key(chain_id).await?;
        key.is_hardware = true;
        Ok(key)
    }

    fn capabilities(&self) -> SigningCapabilities {
        let mut caps = self.inner.capabilities().restrict_to_hardware();
        caps.sign_eip712 = self.eip712;
        caps
    }

    async fn sign_direct(
        &self,
        _chain_id: &str,
        _signer: &str,
        _doc: SignDoc,
    ) -> Result<DirectSignResponse, Self::Error> {
        Err(UnsupportedSignMode::Direct.into())
    }

    async fn sign_amino(
        &self,
        chain_id: &str,
        signer: &str,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error> {
        self.inner.sign_amino(chain_id, signer, doc).await
    }

    async fn sign_eip712(
        &self,
        chain_id: &str,
        signer: &str,
        typed_data: TypedData,
        doc: StdSignDoc,
    ) -> Result<AminoSignResponse, Self::Error> {
        if !self.eip712 {
            return Err(UnsupportedSignMode::Eip712.into());
        }
        self.inner.sign_eip712(chain_id, signer, typed_data, doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalWallet;

    #[tokio::test]
    async fn refuses_direct_signing_even_with_a_capable_key() {
        let device = HardwareRestricted::new(LocalWallet::random(&mut rand::thread_rng()));
        let doc = SignDoc {
            body_bytes: vec![],
            auth_info_bytes: vec![],
            chain_id: "cosmoshub-4".into(),
            account_number: 0,
        };
        let err = device.sign_direct("cosmoshub-4", "", doc).await.unwrap_err();
        assert!(matches!(
            err,
            crate::WalletError::Unsupported(UnsupportedSignMode::Direct)
        ));
    }

    #[test]
    fn masks_capabilities() {
        let wallet = LocalWallet::random(&mut rand::thread_rng());
        assert!(wallet.capabilities().sign_direct);

        let device = HardwareRestricted::new(wallet.clone());
        let caps = device.capabilities();
        assert!(!caps.sign_direct);
        assert!(caps.sign_amino);
        assert!(!caps.sign_eip712);
        assert!(caps.is_hardware);

        assert!(HardwareRestricted::new(wallet).with_eip712().capabilities().sign_eip712);
    }

    #[tokio::test]
    async fn reported_key_is_marked_hardware() {
        let device = HardwareRestricted::new(LocalWallet::random(&mut rand::thread_rng()));
        let key = device.key("cosmoshub-4").await.unwrap();
        assert!(key.is_hardware);
    }
}
