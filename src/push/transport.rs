//! HTTP transport seam.
//!
//! The push client only needs two calls: a GET that returns a body and a
//! POST of a JSON document. Anything that answers with a non-success status
//! is reported as [`TransportError::Status`] so the caller can classify it.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use super::error::TransportError;

/// Ordered list of request headers as `(name, value)` pairs.
pub type Headers = [(String, String)];

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and returns the response body.
    async fn get(&self, url: &str, headers: &Headers) -> Result<String, TransportError>;

    /// POSTs `body` as `application/json` and returns the response body.
    async fn post_json(
        &self,
        url: &str,
        body: String,
        headers: &Headers,
    ) -> Result<String, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    async fn finish(
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(format!("{url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("{url}: {e}")))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<String, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        Self::finish(url, request).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: String,
        headers: &Headers,
    ) -> Result<String, TransportError> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        Self::finish(url, request).await
    }
}
