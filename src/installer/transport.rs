//! HTTP transport for installer requests

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::request::RequestEnvelope;
use crate::error::Result;
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

/// Status, headers and raw body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends a single request; implementations must not retry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestEnvelope) -> Result<TransportResponse>;
}

/// Transport backed by a `reqwest` client with a bounded timeout
pub struct ReqwestTransport {
    http_client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = create_http_client(&NetworkConfig::with_request_timeout(timeout))?;
        Ok(Self {
            http_client,
            timeout,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestEnvelope) -> Result<TransportResponse> {
        let RequestEnvelope {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self
            .http_client
            .request(method, &url)
            .headers(headers)
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        debug!("Response status code: {}", status);
        debug!("Response headers: {:?}", headers);
        debug!("Response content: {}", body);

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
