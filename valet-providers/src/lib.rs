//! REST boundary to Cosmos full nodes.
//!
//! A [`RestClient`] is a raw JSON-over-HTTP transport; [`Provider`] adds
//! the typed queries the rest of the stack needs: accounts, simulation,
//! broadcast, confirmation polling and authz grant listings. Swap the
//! transport for a mock to test everything above it without a node.

#![deny(unsafe_code)]

mod grants;
mod http;
mod pending;
mod provider;

#[cfg(test)]
pub(crate) mod testutil;

pub use grants::{collect_grants, grants_for_pairs, GRANT_FAN_OUT_WIDTH};
pub use http::{Http, HttpClientError};
pub use pending::PendingTx;
pub use provider::{Account, Block, Provider, TxResult};

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport errors the provider needs to inspect.
///
/// Fallback decisions hinge on the HTTP status (404 for missing accounts,
/// 501 for unimplemented queries) and on the node's own error message.
pub trait RestError: std::error::Error + Send + Sync + 'static {
    /// HTTP status of the response, when one was received.
    fn status(&self) -> Option<u16>;

    /// The node-reported error message, verbatim.
    fn remote_message(&self) -> Option<&str>;
}

impl std::error::Error for Box<dyn RestError> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        (**self).source()
    }
}

/// A raw JSON transport to one REST endpoint.
#[async_trait]
pub trait RestClient: std::fmt::Debug + Send + Sync {
    type Error: RestError;

    /// Sends a GET request for `path` with the given query string pairs.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, Self::Error>;

    /// Sends a POST request with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, Self::Error>;
}

/// Errors from the typed provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying transport failed.
    #[error(transparent)]
    Rest(Box<dyn RestError>),

    #[error("account {0} does not exist on chain")]
    AccountNotFound(String),

    /// Simulation was rejected; carries the node's message verbatim.
    #[error("simulation failed: {0}")]
    SimulationFailed(String),

    /// The node refused to admit the transaction to its mempool.
    #[error("broadcast rejected with code {code}: {raw_log}")]
    BroadcastRejected { code: u32, raw_log: String },

    /// The transaction was included but execution failed.
    #[error("transaction {hash} failed with code {code}: {raw_log}")]
    TxFailed { hash: String, code: u32, raw_log: String },

    /// The transaction was submitted but not found within the polling
    /// budget. It may still confirm; callers should check later.
    #[error(
        "transaction {hash} was submitted but not yet found on chain after \
         {waited:?}, you might want to check later"
    )]
    ConfirmationTimeout { hash: String, waited: Duration },

    /// The endpoint answered 501 for a query this node cannot serve.
    #[error("endpoint does not implement this query")]
    UnsupportedQuery,

    #[error("unexpected response shape from {0}")]
    MalformedResponse(&'static str),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl ProviderError {
    /// Wraps a transport error, lifting 501 responses to
    /// [`ProviderError::UnsupportedQuery`].
    pub fn from_rest<E: RestError>(err: E) -> Self {
        if err.status() == Some(501) {
            return ProviderError::UnsupportedQuery;
        }
        ProviderError::Rest(Box::new(err))
    }
}
