//! Scripted [`UpstreamClient`] for unit tests.

use calproxy_common::{BoxFuture, CalproxyError, UpstreamClient, UpstreamResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Get(String),
    Post(String, Value),
}

/// Replays queued responses in order and records every call.
#[derive(Default)]
pub struct FakeClient {
    responses: Mutex<VecDeque<Result<UpstreamResponse, CalproxyError>>>,
    calls: Mutex<Vec<Recorded>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(UpstreamResponse::new(status, body)));
        self
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(self, error: CalproxyError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self) -> Result<UpstreamResponse, CalproxyError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected upstream call"))
    }
}

impl UpstreamClient for FakeClient {
    fn get(&self, url: &str) -> BoxFuture<'_, UpstreamResponse, CalproxyError> {
        self.calls.lock().unwrap().push(Recorded::Get(url.to_string()));
        let next = self.next();
        Box::pin(async move { next })
    }

    fn post_json(&self, url: &str, body: &Value) -> BoxFuture<'_, UpstreamResponse, CalproxyError> {
        self.calls
            .lock()
            .unwrap()
            .push(Recorded::Post(url.to_string(), body.clone()));
        let next = self.next();
        Box::pin(async move { next })
    }
}
