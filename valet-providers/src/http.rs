//! A low-level REST client over HTTP.

use std::fmt::Debug;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::{RestClient, RestError};

/// A REST client backed by `reqwest`.
///
/// # Example
///
/// ```no_run
/// use valet_providers::Http;
/// use std::str::FromStr;
///
/// let client = Http::from_str("https://rest.cosmos.directory/cosmoshub").unwrap();
/// ```
#[derive(Clone)]
pub struct Http {
    client: Client,
    url: Url,
}

impl Debug for Http {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Http {{ url: {} }}", self.url)
    }
}

/// Error thrown when sending an HTTP request
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Thrown if the request failed
    #[error(transparent)]
    ReqwestError(#[from] ReqwestError),

    /// A non-success response, with the node's error message when the
    /// body carried one.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    /// Thrown if the response could not be parsed
    #[error("Deserialization Error: {err}. Response: {text}")]
    SerdeJson { err: serde_json::Error, text: String },
}

impl RestError for HttpClientError {
    fn status(&self) -> Option<u16> {
        match self {
            HttpClientError::Status { status, .. } => Some(*status),
            HttpClientError::ReqwestError(err) => err.status().map(|s| s.as_u16()),
            HttpClientError::SerdeJson { .. } => None,
        }
    }

    fn remote_message(&self) -> Option<&str> {
        match self {
            HttpClientError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl Http {
    /// Initializes a new HTTP client against a REST endpoint.
    pub fn new(url: impl Into<Url>) -> Self {
        Self::new_with_client(url, Client::new())
    }

    /// Allows customizing the provider with your own HTTP client.
    pub fn new_with_client(url: impl Into<Url>, client: Client) -> Self {
        Self { client, url: url.into() }
    }

    /// The URL requests are made against.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.url.as_str().trim_end_matches('/'), path)
    }

    async fn handle(response: reqwest::Response) -> Result<Value, HttpClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(HttpClientError::Status {
                status: status.as_u16(),
                message: remote_message(&body, status),
            });
        }
        serde_json::from_slice(&body).map_err(|err| HttpClientError::SerdeJson {
            err,
            text: String::from_utf8_lossy(&body).to_string(),
        })
    }
}

/// Extracts the node's error message from an LCD error body
/// (`{"code": n, "message": "..."}`), falling back to the status text.
fn remote_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("unknown error").to_owned()
        })
}

#[async_trait]
impl RestClient for Http {
    type Error = HttpClientError;

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, HttpClientError> {
        let response = self.client.get(self.join(path)).query(query).send().await?;
        Self::handle(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, HttpClientError> {
        let response = self.client.post(self.join(path)).json(body).send().await?;
        Self::handle(response).await
    }
}

impl FromStr for Http {
    type Err = url::ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(Http::new(Url::parse(src)?))
    }
}
