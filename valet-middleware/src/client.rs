//! A provider, a signer and a chain profile tied into one signing client.

use prost::Message as _;

use valet_core::chain::ChainProfile;
use valet_core::msg::Msg;
use valet_core::proto::tx::TxRaw;
use valet_core::types::{CoinError, Fee, GasPrice};
use valet_providers::{PendingTx, Provider, ProviderError, RestClient, TxResult};
use valet_signers::SignerProvider;

use crate::adapter::{AdapterError, SignContext, SignError, SigningAdapter};

/// Gas limit used when the caller supplies neither a limit nor a
/// simulation result.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Gas limit on the placeholder fee attached to simulation requests.
const SIMULATE_GAS_LIMIT: u64 = 100_000;

/// Errors from the end-to-end signing flow.
#[derive(Debug, thiserror::Error)]
pub enum ClientError<E: std::error::Error + Send + Sync> {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error(transparent)]
    Coin(#[from] CoinError),
    #[error("{0}")]
    Signer(E),
}

impl<E: std::error::Error + Send + Sync> From<SignError<E>> for ClientError<E> {
    fn from(err: SignError<E>) -> Self {
        match err {
            SignError::Adapter(err) => ClientError::Adapter(err),
            SignError::Signer(err) => ClientError::Signer(err),
        }
    }
}

/// Builds, signs, simulates and broadcasts transactions for one chain.
#[derive(Debug)]
pub struct SigningClient<C, S> {
    provider: Provider<C>,
    signer: S,
    profile: ChainProfile,
    adapter: SigningAdapter,
}

impl<C: RestClient, S: SignerProvider> SigningClient<C, S> {
    pub fn new(provider: Provider<C>, signer: S, profile: ChainProfile) -> Self {
        let adapter = SigningAdapter::new(profile.clone());
        Self { provider, signer, profile, adapter }
    }

    pub fn provider(&self) -> &Provider<C> {
        &self.provider
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    /// Computes a fee at the chain's gas price, or an explicit one.
    pub fn fee(&self, gas: Option<u64>, gas_price: Option<&GasPrice>) -> Result<Fee, CoinError> {
        Fee::from_gas(
            gas.unwrap_or(DEFAULT_GAS_LIMIT),
            gas_price.unwrap_or(&self.profile.gas_price),
        )
    }

    /// Simulates the messages and returns a gas limit with the profile's
    /// headroom applied.
    pub async fn simulate(
        &self,
        address: &str,
        msgs: &[Msg],
        memo: &str,
    ) -> Result<u64, ClientError<S::Error>> {
        let account = self.provider.account(address).await?;
        let key = self
            .signer
            .key(&self.profile.chain_id)
            .await
            .map_err(ClientError::Signer)?;
        let fee = self.fee(Some(SIMULATE_GAS_LIMIT), None)?;
        let ctx = SignContext {
            chain_id: &self.profile.chain_id,
            address,
            account_number: account.account_number,
            sequence: account.sequence,
            pub_key: &key.pub_key,
            account_pub_key_type: account.pub_key_type_url.as_deref(),
            latest_height: None,
        };
        let tx = self.adapter.simulate_tx(&ctx, msgs, memo, &fee);
        let gas_used = self.provider.simulate(&tx.encode_to_vec()).await?;
        Ok((gas_used as f64 * self.profile.gas_modifier).ceil() as u64)
    }

    /// Signs the messages with the most compatible method the signer
    /// offers, returning the broadcastable transaction.
    pub async fn sign(
        &self,
        address: &str,
        msgs: &[Msg],
        memo: &str,
        fee: &Fee,
    ) -> Result<TxRaw, ClientError<S::Error>> {
        let account = self.provider.account(address).await?;
        let key = self
            .signer
            .key(&self.profile.chain_id)
            .await
            .map_err(ClientError::Signer)?;
        // only the typed-data path dates signatures against a block height
        let latest_height = if self.adapter.needs_latest_height(&self.signer) {
            Some(self.provider.latest_block().await?.height)
        } else {
            None
        };
        let ctx = SignContext {
            chain_id: &self.profile.chain_id,
            address,
            account_number: account.account_number,
            sequence: account.sequence,
            pub_key: &key.pub_key,
            account_pub_key_type: account.pub_key_type_url.as_deref(),
            latest_height,
        };
        Ok(self.adapter.sign(&self.signer, &ctx, msgs, memo, fee).await?)
    }

    /// Broadcasts a signed transaction, with the profile's confirmation
    /// budget applied to the returned handle.
    pub async fn broadcast(
        &self,
        tx: &TxRaw,
    ) -> Result<PendingTx<'_, C>, ClientError<S::Error>> {
        let pending = self.provider.broadcast(&tx.encode_to_vec()).await?;
        Ok(pending.timeout(self.profile.tx_timeout))
    }

    /// The full pipeline: simulate when no gas limit is given, sign,
    /// broadcast and wait for confirmation.
    pub async fn sign_and_broadcast(
        &self,
        address: &str,
        msgs: &[Msg],
        memo: &str,
        gas: Option<u64>,
    ) -> Result<TxResult, ClientError<S::Error>> {
        let gas = match gas {
            Some(gas) => gas,
            None => self.simulate(address, msgs, memo).await?,
        };
        let fee = self.fee(Some(gas), None)?;
        let tx = self.sign(address, msgs, memo, &fee).await?;
        Ok(self.broadcast(&tx).await?.confirmed().await?)
    }
}
