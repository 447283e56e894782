use once_cell::sync::Lazy;
use reqwest::{header::CONTENT_TYPE, Client, Error as ReqwestError};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::CalproxyError;
use crate::services::{BoxFuture, UpstreamClient, UpstreamResponse};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A static HTTP client that can be reused across the application.
/// This client is configured with a default timeout and follows redirects.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
});

/// Creates a new HTTP client with a custom timeout.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// [`UpstreamClient`] backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestUpstreamClient {
    client: Client,
}

impl ReqwestUpstreamClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Uses the shared client, or a dedicated one when a timeout is given.
    pub fn from_timeout(timeout_secs: Option<u64>) -> Result<Self, CalproxyError> {
        let client = match timeout_secs {
            Some(secs) => create_client(secs)?,
            None => HTTP_CLIENT.clone(),
        };
        Ok(Self::new(client))
    }

    async fn read(response: reqwest::Response) -> Result<UpstreamResponse, CalproxyError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_len = body.len(), "Upstream response received");
        Ok(UpstreamResponse { status, body })
    }
}

impl Default for ReqwestUpstreamClient {
    fn default() -> Self {
        Self::new(HTTP_CLIENT.clone())
    }
}

impl UpstreamClient for ReqwestUpstreamClient {
    fn get(&self, url: &str) -> BoxFuture<'_, UpstreamResponse, CalproxyError> {
        // The batched query endpoint expects a JSON content type even on GET
        let request = self.client.get(url).header(CONTENT_TYPE, "application/json");
        Box::pin(async move { Self::read(request.send().await?).await })
    }

    fn post_json(&self, url: &str, body: &Value) -> BoxFuture<'_, UpstreamResponse, CalproxyError> {
        let request = self.client.post(url).json(body);
        Box::pin(async move { Self::read(request.send().await?).await })
    }
}
