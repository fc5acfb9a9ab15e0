use thiserror::Error;

/// Main error type for mariner-baremetal operations
#[derive(Debug, Error)]
pub enum MarinerError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Error parsing host configuration file '{path}': {details}")]
    HostConfigParse { path: String, details: String },

    #[error("Host configuration is missing required key '{key}'")]
    MissingConfigKey { key: String },

    #[error("Request failed with status code {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("DNS resolution failed for host '{host}': {details}")]
    DnsResolutionError { host: String, details: String },

    #[error("SSL/TLS error: {0}")]
    SslError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MarinerError {
    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        Self::AuthenticationError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn host_config_parse<P: Into<String>, S: Into<String>>(path: P, details: S) -> Self {
        Self::HostConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }

    pub fn missing_config_key<S: Into<String>>(key: S) -> Self {
        Self::MissingConfigKey { key: key.into() }
    }

    pub fn api<S: Into<String>>(status: u16, body: S) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::NetworkError(msg.into())
    }

    pub fn connection_timeout<S: Into<String>>(msg: S) -> Self {
        Self::ConnectionTimeout(msg.into())
    }

    pub fn connection_refused<S: Into<String>>(msg: S) -> Self {
        Self::ConnectionRefused(msg.into())
    }

    pub fn dns_resolution<S: Into<String>>(host: S, details: S) -> Self {
        Self::DnsResolutionError {
            host: host.into(),
            details: details.into(),
        }
    }

    pub fn ssl_error<S: Into<String>>(msg: S) -> Self {
        Self::SslError(msg.into())
    }

    pub fn invalid_url<S: Into<String>>(msg: S) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether the error happened below the HTTP layer (no response was received)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError(_)
                | Self::ConnectionTimeout(_)
                | Self::ConnectionRefused(_)
                | Self::DnsResolutionError { .. }
                | Self::SslError(_)
                | Self::InvalidUrl(_)
                | Self::HttpError(_)
        )
    }
}

/// Result type alias for mariner-baremetal operations
pub type Result<T> = std::result::Result<T, MarinerError>;

/// Convert Azure Core errors to MarinerError
impl From<azure_core::Error> for MarinerError {
    fn from(error: azure_core::Error) -> Self {
        Self::AuthenticationError(error.to_string())
    }
}

impl From<toml::de::Error> for MarinerError {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigError(error.to_string())
    }
}

impl From<toml::ser::Error> for MarinerError {
    fn from(error: toml::ser::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}
