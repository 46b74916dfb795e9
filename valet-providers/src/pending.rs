//! A broadcast acknowledgment that polls for confirmation.

use std::fmt;
use std::ops::Deref;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::provider::{Provider, TxResult};
use crate::{ProviderError, RestClient};

/// How often the chain is polled for the transaction.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
/// How long to poll before giving up.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60);

/// A transaction the node has accepted but not yet included in a block.
///
/// Awaiting [`confirmed`](Self::confirmed) polls the transaction query
/// until the hash is found or the deadline passes. Lookup errors while
/// polling are expected (the tx index lags inclusion) and do not abort
/// the wait. Derefs to the transaction hash.
#[must_use = "a pending transaction confirms nothing until polled"]
pub struct PendingTx<'a, C> {
    hash: String,
    provider: &'a Provider<C>,
    interval: Duration,
    timeout: Duration,
}

impl<'a, C: RestClient> PendingTx<'a, C> {
    /// Creates a handle with the default 3 s / 60 s polling budget.
    pub fn new(hash: String, provider: &'a Provider<C>) -> Self {
        Self {
            hash,
            provider,
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Sets the time between polls.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the wall-clock polling budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The transaction hash being waited on.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Polls until the transaction is found or the deadline passes.
    ///
    /// A found transaction with a non-zero code is an execution failure
    /// carrying the raw log. Hitting the deadline yields
    /// [`ProviderError::ConfirmationTimeout`]: the transaction may still
    /// confirm later.
    pub async fn confirmed(self) -> Result<TxResult, ProviderError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            sleep(self.interval).await;
            match self.provider.tx(&self.hash).await {
                Ok(result) if result.code != 0 => {
                    return Err(ProviderError::TxFailed {
                        hash: self.hash,
                        code: result.code,
                        raw_log: result.raw_log,
                    })
                }
                Ok(result) => return Ok(result),
                Err(err) => {
                    tracing::trace!(hash = %self.hash, error = %err, "tx not found yet");
                }
            }
            if Instant::now() >= deadline {
                return Err(ProviderError::ConfirmationTimeout {
                    hash: self.hash,
                    waited: self.timeout,
                });
            }
        }
    }
}

impl<C> fmt::Debug for PendingTx<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTx")
            .field("hash", &self.hash)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<C> Deref for PendingTx<'_, C> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClient, MockError};
    use serde_json::json;

    const TX_PATH: &str = "/cosmos/tx/v1beta1/txs/AB12";

    fn found(code: u32) -> serde_json::Value {
        json!({ "tx_response": {
            "txhash": "AB12",
            "code": code,
            "raw_log": if code == 0 { "" } else { "failed to execute message" },
            "height": "777",
            "gas_wanted": "200000",
            "gas_used": "150000",
        }})
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_polling_through_lookup_errors() {
        let client = MockClient::new()
            .fail(TX_PATH, MockError::status(404, "tx not found"))
            .fail(TX_PATH, MockError::status(404, "tx not found"))
            .respond(TX_PATH, found(0));
        let provider = Provider::new(client);
        let result = PendingTx::new("AB12".into(), &provider).confirmed().await.unwrap();
        assert_eq!(result.height, 777);
        assert_eq!(provider.client().calls.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_yields_the_check_later_error() {
        let client = MockClient::new().fail(TX_PATH, MockError::status(404, "tx not found"));
        let provider = Provider::new(client);
        let err = PendingTx::new("AB12".into(), &provider)
            .confirmed()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ConfirmationTimeout { hash, waited }
                if hash == "AB12" && waited == DEFAULT_POLL_TIMEOUT
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_execution_is_not_a_timeout() {
        let client = MockClient::new().respond(TX_PATH, found(11));
        let provider = Provider::new(client);
        let err = PendingTx::new("AB12".into(), &provider)
            .confirmed()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::TxFailed { code: 11, raw_log, .. }
                if raw_log == "failed to execute message"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_budget_is_honored() {
        let client = MockClient::new().fail(TX_PATH, MockError::status(404, "tx not found"));
        let provider = Provider::new(client);
        let pending = PendingTx::new("AB12".into(), &provider)
            .interval(Duration::from_secs(1))
            .timeout(Duration::from_secs(5));
        assert_eq!(&*pending, "AB12");
        pending.confirmed().await.unwrap_err();
        // one poll per second within a five second budget
        assert_eq!(provider.client().calls.lock().unwrap().len(), 5);
    }
}
