//! Service abstractions for external services.
//!
//! The adapters never call `reqwest` directly; they go through
//! [`UpstreamClient`] so tests can substitute a fake or point the real client
//! at a mock server.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use crate::error::CalproxyError;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Status and raw body of an upstream response.
///
/// Non-success statuses are not errors at this level; each adapter decides
/// how to surface them.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<Value, CalproxyError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP access to the upstream scheduling service.
pub trait UpstreamClient: Send + Sync {
    /// Issues a read-only request.
    fn get(&self, url: &str) -> BoxFuture<'_, UpstreamResponse, CalproxyError>;

    /// Issues a write request with a JSON body.
    fn post_json(&self, url: &str, body: &Value) -> BoxFuture<'_, UpstreamResponse, CalproxyError>;
}
