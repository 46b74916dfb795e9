//! In-memory transport for provider tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::{RestClient, RestError};

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct MockError {
    pub status: Option<u16>,
    pub message: String,
}

impl MockError {
    pub fn status(status: u16, message: &str) -> Self {
        Self { status: Some(status), message: message.to_owned() }
    }
}

impl RestError for MockError {
    fn status(&self) -> Option<u16> {
        self.status
    }

    fn remote_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Routes requests by path to queued responses; each response is served
/// once, the last one repeats.
#[derive(Debug, Default)]
pub(crate) struct MockClient {
    routes: Mutex<HashMap<String, VecDeque<Result<Value, MockError>>>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, response: Result<Value, MockError>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_owned())
            .or_default()
            .push_back(response);
        self
    }

    pub fn respond(self, path: &str, response: Value) -> Self {
        self.route(path, Ok(response))
    }

    pub fn fail(self, path: &str, error: MockError) -> Self {
        self.route(path, Err(error))
    }

    fn next(&self, path: &str) -> Result<Value, MockError> {
        self.calls.lock().unwrap().push(path.to_owned());
        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(path)
            .unwrap_or_else(|| panic!("no route for {path}"));
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| unreachable!())
        } else {
            queue.front().cloned().unwrap_or_else(|| panic!("no response left for {path}"))
        }
    }
}

#[async_trait]
impl RestClient for MockClient {
    type Error = MockError;

    async fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value, MockError> {
        self.next(path)
    }

    async fn post(&self, path: &str, _body: &Value) -> Result<Value, MockError> {
        self.next(path)
    }
}
