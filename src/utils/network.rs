use crate::config::DEFAULT_TIMEOUT;
use crate::error::{MarinerError, Result};
use reqwest::Client;
use std::time::Duration;

/// Configuration for HTTP client with proper timeouts and user-friendly error handling
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("mariner-baremetal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetworkConfig {
    pub fn with_request_timeout(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..Self::default()
        }
    }
}

/// Create a properly configured HTTP client with timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| MarinerError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Map a reqwest failure to a transport error with a readable message
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> MarinerError {
    let host = extract_host_from_url(url);

    if error.is_timeout() {
        return MarinerError::connection_timeout(format!(
            "Request to '{}' timed out. The service may be unreachable or overloaded.",
            host
        ));
    }

    if error.is_connect() {
        if is_dns_resolution_error(error) {
            return MarinerError::dns_resolution(
                host.clone(),
                format!("Unable to resolve hostname '{}'. Check your network connection.", host),
            );
        }

        if is_connection_refused(error) {
            return MarinerError::connection_refused(format!(
                "Connection to '{}' was refused. The service may be temporarily unavailable.",
                host
            ));
        }

        return MarinerError::network(format!(
            "Failed to connect to '{}'. Please check your network connection.",
            host
        ));
    }

    let message = error_chain_text(error);
    if message.contains("ssl") || message.contains("tls") || message.contains("certificate") {
        return MarinerError::ssl_error(format!(
            "SSL/TLS connection error when accessing '{}'. This may be due to certificate issues or network security policies.",
            host
        ));
    }

    if error.is_builder() {
        return MarinerError::invalid_url(format!("Invalid request URL '{}': {}", url, error));
    }

    MarinerError::network(format!(
        "Network error when accessing '{}': {}. Please check your internet connection and try again.",
        host, error
    ))
}

/// The error message and every message in its `source()` chain, lowercased.
///
/// reqwest only prints the error kind and URL; the io and resolver causes
/// live further down the chain.
fn error_chain_text(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text.to_lowercase()
}

fn has_io_kind(error: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == kind {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn is_connection_refused(error: &reqwest::Error) -> bool {
    has_io_kind(error, std::io::ErrorKind::ConnectionRefused)
        || error_chain_text(error).contains("connection refused")
}

fn is_dns_resolution_error(error: &reqwest::Error) -> bool {
    let error_msg = error_chain_text(error);
    let dns_indicators = [
        "dns",
        "name resolution",
        "resolve",
        "lookup",
        "name or service not known",
        "nodename nor servname provided",
        "temporary failure in name resolution",
        "no such host",
        "host not found",
        "getaddrinfo failed",
        "could not resolve host",
    ];

    dns_indicators
        .iter()
        .any(|&indicator| error_msg.contains(indicator))
}

/// Extract the host portion of a URL for error messages
pub fn extract_host_from_url(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "unknown-host".to_string())
}
