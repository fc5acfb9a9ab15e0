//! Outbound request assembly
//!
//! Every request carries a bearer token, a JSON content type and a freshly
//! generated `x-ms-client-request-id`. Only create requests have a body.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;

use super::endpoint::storage_account_url;
use super::host_config::HostConfiguration;
use super::models::{
    BlobStorageConfiguration, InstallerCreateBody, InstallerProperties, InstallerRequestParams,
};
use crate::error::{MarinerError, Result};
use crate::utils::helpers::generate_request_id;

pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

/// A fully built request, ready to hand to a transport
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestEnvelope {
    fn new(method: Method, url: String, token: &str, body: Option<String>) -> Result<Self> {
        let envelope = Self {
            method,
            url,
            headers: create_headers(token)?,
            body,
        };
        envelope.log();
        Ok(envelope)
    }

    /// Correlation id attached to this request
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(CLIENT_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
    }

    fn log(&self) {
        // Authorization is marked sensitive, so Debug prints it as "Sensitive"
        debug!("Request: {} {}", self.method, self.url);
        debug!("Request headers: {:?}", self.headers);
        if let Some(body) = &self.body {
            debug!("Request body: {}", body);
        }
    }
}

/// Create authorized headers for the provisioning API
fn create_headers(token: &str) -> Result<HeaderMap> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| MarinerError::authentication(format!("Invalid token format: {}", e)))?;
    authorization.set_sensitive(true);

    let request_id = HeaderValue::from_str(&generate_request_id())
        .map_err(|e| MarinerError::invalid_argument(format!("Invalid request id: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(HeaderName::from_static(CLIENT_REQUEST_ID), request_id);
    Ok(headers)
}

/// JSON body for creating an installer image
pub fn build_create_body(
    location: &str,
    params: &InstallerRequestParams,
    host_config: &HostConfiguration,
) -> Result<String> {
    let body = InstallerCreateBody {
        location: location.to_string(),
        properties: InstallerProperties {
            blob_storage_configuration: BlobStorageConfiguration {
                account_url: storage_account_url(&params.storage_account),
                container_name: params.blob_container.clone(),
                blob_name: params.installer_name.clone(),
            },
            host_configuration: host_config.host_configuration()?.clone(),
        },
    };
    if let Some(tags) = &params.tags {
        debug!("Ignoring {} tag(s); installer images do not carry tags", tags.len());
    }

    serde_json::to_string(&body).map_err(|e| {
        MarinerError::serialization(format!("Failed to serialize create request body: {}", e))
    })
}

/// PUT request creating (or replacing) an installer image
pub fn build_create_request(
    url: String,
    location: &str,
    params: &InstallerRequestParams,
    host_config: &HostConfiguration,
    token: &str,
) -> Result<RequestEnvelope> {
    let body = build_create_body(location, params, host_config)?;
    RequestEnvelope::new(Method::PUT, url, token, Some(body))
}

/// GET request used by list and show
pub fn build_read_request(url: String, token: &str) -> Result<RequestEnvelope> {
    RequestEnvelope::new(Method::GET, url, token, None)
}

pub fn build_delete_request(url: String, token: &str) -> Result<RequestEnvelope> {
    RequestEnvelope::new(Method::DELETE, url, token, None)
}
