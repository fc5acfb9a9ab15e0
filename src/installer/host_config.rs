//! Host configuration loading
//!
//! The host configuration is a user-authored YAML document describing the
//! machine being provisioned. Its `host-configuration` subtree is forwarded
//! to the provisioning API without interpretation.

use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, error};

use crate::error::{MarinerError, Result};

/// Top-level key that must be present in the host configuration file
pub const HOST_CONFIGURATION_KEY: &str = "host-configuration";

/// Parsed host configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfiguration {
    document: Value,
}

impl HostConfiguration {
    /// Parse a YAML document held in memory, expanding `<<` merge keys
    pub fn parse(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let mut document = serde_yaml::from_str::<Value>(contents)?;
        document.apply_merge()?;
        Ok(Self { document })
    }

    /// The `host-configuration` subtree
    pub fn host_configuration(&self) -> Result<&Value> {
        self.document
            .get(HOST_CONFIGURATION_KEY)
            .ok_or_else(|| MarinerError::missing_config_key(HOST_CONFIGURATION_KEY))
    }
}

/// Read and parse the host configuration file at `path`
pub async fn load_host_config(path: &Path) -> Result<HostConfiguration> {
    let path_str = path.display().to_string();
    debug!("Reading host configuration from {}", path_str);

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Error parsing host configuration file: {}", e);
        MarinerError::host_config_parse(path_str.clone(), e.to_string())
    })?;

    HostConfiguration::parse(&contents).map_err(|e| {
        error!("Error parsing host configuration file: {}", e);
        MarinerError::host_config_parse(path_str, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_nested_host_configuration() {
        let file = write_temp(
            "host-configuration:\n  hostname: h1\n  disks:\n    - device: /dev/sda\n      size: 100\n",
        );
        let config = load_host_config(file.path()).await.unwrap();
        let host = config.host_configuration().unwrap();
        assert_eq!(host["hostname"], Value::from("h1"));
        assert_eq!(host["disks"][0]["size"], Value::from(100));
    }

    #[tokio::test]
    async fn test_missing_file_is_parse_error() {
        let err = load_host_config(Path::new("/nonexistent/host-config.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarinerError::HostConfigParse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_parse_error() {
        let file = write_temp("host-configuration: [unterminated\n  - : :");
        let err = load_host_config(file.path()).await.unwrap_err();
        assert!(matches!(err, MarinerError::HostConfigParse { .. }));
    }

    #[test]
    fn test_missing_key() {
        let config = HostConfiguration::parse("hostname: h1\n").unwrap();
        let err = config.host_configuration().unwrap_err();
        assert!(matches!(err, MarinerError::MissingConfigKey { ref key } if key == "host-configuration"));
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let config = HostConfiguration::parse(
            "base: &base\n  dhcp: true\nhost-configuration:\n  nic:\n    <<: *base\n    name: eth0\n",
        )
        .unwrap();
        let nic = &config.host_configuration().unwrap()["nic"];
        assert_eq!(
            serde_json::to_value(nic).unwrap(),
            serde_json::json!({ "dhcp": true, "name": "eth0" })
        );
    }

    #[tokio::test]
    async fn test_load_reports_path_on_failure() {
        let err = load_host_config(Path::new("/nonexistent/host-config.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarinerError::HostConfigParse { ref path, .. } if path == "/nonexistent/host-config.yaml"));
    }

    #[test]
    fn test_scalar_document_has_no_key() {
        let config = HostConfiguration::parse("just a string").unwrap();
        assert!(config.host_configuration().is_err());
    }
}
