//! Configuration settings management
//!
//! This module handles loading configuration from multiple sources,
//! validation, and persistence.

use crate::error::{MarinerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT_URL: &str = "https://centraluseuap.management.azure.com/";
pub const DEFAULT_RESOURCE_PROVIDER: &str = "Private.MarinerProvisioningInstaller";
pub const DEFAULT_API_VERSION: &str = "2023-10-01-privatepreview";
pub const DEFAULT_ARM_ENDPOINT_URL: &str = "https://management.azure.com/";
pub const DEFAULT_INSTALLER_RESOURCE_NAME: &str = "mariner-baremetal-installer";

/// Request timeout applied to every call to the provisioning API
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed coordinates of the installer image resource provider.
///
/// Injected into the endpoint builder so tests can point it at a mock host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub endpoint: String,
    pub resource_provider: String,
    pub api_version: String,
    /// Azure Resource Manager host used to resolve resource group locations
    pub arm_endpoint: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT_URL.to_string(),
            resource_provider: DEFAULT_RESOURCE_PROVIDER.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            arm_endpoint: DEFAULT_ARM_ENDPOINT_URL.to_string(),
        }
    }
}

impl ApiSettings {
    /// Endpoint with exactly one trailing slash
    pub fn base_url(&self) -> String {
        format!("{}/", self.endpoint.trim_end_matches('/'))
    }

    pub fn arm_base_url(&self) -> String {
        format!("{}/", self.arm_endpoint.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub subscription_id: String,
    /// Used when the resource group location cannot be resolved
    pub default_location: String,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    pub api: ApiSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            subscription_id: String::new(),
            default_location: String::new(),
            request_timeout: DEFAULT_TIMEOUT,
            api: ApiSettings::default(),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(MarinerError::config("API endpoint must not be empty"));
        }

        if self.api.api_version.trim().is_empty() {
            return Err(MarinerError::config("API version must not be empty"));
        }

        if self.request_timeout.is_zero() {
            return Err(MarinerError::config("Request timeout must be greater than zero"));
        }

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        // XDG layout on Linux and macOS, platform config directory elsewhere
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| MarinerError::config("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join("mariner-baremetal").join("config.toml"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| MarinerError::config("Unable to determine config directory"))?;
            Ok(config_dir.join("mariner-baremetal").join("config.toml"))
        }
    }

    /// Resolve subscription ID
    /// Priority: CLI argument > config/env > Azure CLI default subscription
    pub async fn resolve_subscription_id(&self, sub_arg: Option<String>) -> Result<String> {
        if let Some(sub) = sub_arg.filter(|s| !s.trim().is_empty()) {
            return Ok(sub);
        }

        if !self.subscription_id.is_empty() {
            return Ok(self.subscription_id.clone());
        }

        if let Some(sub) = crate::utils::azure_detect::current_subscription_id().await {
            debug!("Using Azure CLI default subscription {}", sub);
            return Ok(sub);
        }

        Err(MarinerError::config(
            "No subscription ID specified. Use --subscription, set AZURE_SUBSCRIPTION_ID, or run 'az login'",
        ))
    }
}

/// Load configuration from multiple sources with priority order:
/// 1. Command-line flags (handled by clap)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Default values
pub async fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = Config::get_config_path()?;
    if config_path.exists() {
        config = load_from_file(&config_path).await?;
    }

    load_from_env(&mut config);

    config.validate()?;

    Ok(config)
}

async fn load_from_file(path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", path.display());
    let contents = tokio::fs::read_to_string(path).await?;
    let config = toml::from_str::<Config>(&contents)?;
    Ok(config)
}

fn load_from_env(config: &mut Config) {
    if let Ok(value) = std::env::var("DEBUG") {
        config.debug = value.to_lowercase() == "true" || value == "1";
    }

    if let Ok(value) = std::env::var("AZURE_SUBSCRIPTION_ID") {
        config.subscription_id = value;
    }

    if let Ok(value) = std::env::var("DEFAULT_LOCATION") {
        config.default_location = value;
    }

    if let Ok(value) = std::env::var("MARINER_BAREMETAL_ENDPOINT") {
        config.api.endpoint = value;
    }

    if let Ok(value) = std::env::var("MARINER_BAREMETAL_PROVIDER") {
        config.api.resource_provider = value;
    }

    if let Ok(value) = std::env::var("MARINER_BAREMETAL_API_VERSION") {
        config.api.api_version = value;
    }

    if let Ok(value) = std::env::var("MARINER_BAREMETAL_ARM_ENDPOINT") {
        config.api.arm_endpoint = value;
    }

    if let Ok(value) = std::env::var("REQUEST_TIMEOUT") {
        if let Ok(seconds) = value.parse::<u64>() {
            config.request_timeout = Duration::from_secs(seconds);
        }
    }
}

pub async fn save_config(config: &Config) -> Result<PathBuf> {
    let config_path = Config::get_config_path()?;

    if let Some(parent) = config_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(config)?;
    tokio::fs::write(&config_path, contents).await?;

    Ok(config_path)
}

/// Write a default configuration file unless one already exists
pub async fn init_default_config() -> Result<PathBuf> {
    let config_path = Config::get_config_path()?;

    if config_path.exists() {
        return Ok(config_path);
    }

    save_config(&Config::default()).await
}
