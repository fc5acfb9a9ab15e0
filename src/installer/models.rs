//! Installer image data models
//!
//! Parameters collected from the command line and the JSON shapes sent to
//! the provisioning API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::DEFAULT_INSTALLER_RESOURCE_NAME;

/// Parameters for creating (or updating) an installer image resource
#[derive(Debug, Clone, PartialEq)]
pub struct InstallerRequestParams {
    pub resource_group: String,
    pub installer_name: String,
    pub storage_account: String,
    pub blob_container: String,
    pub host_config_path: PathBuf,
    pub location: Option<String>,
    /// Accepted on the command line; the provisioning API does not take tags
    pub tags: Option<BTreeMap<String, String>>,
}

impl InstallerRequestParams {
    pub fn new(
        resource_group: impl Into<String>,
        storage_account: impl Into<String>,
        blob_container: impl Into<String>,
        host_config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resource_group: resource_group.into(),
            installer_name: DEFAULT_INSTALLER_RESOURCE_NAME.to_string(),
            storage_account: storage_account.into(),
            blob_container: blob_container.into(),
            host_config_path: host_config_path.into(),
            location: None,
            tags: None,
        }
    }

    pub fn with_installer_name(mut self, installer_name: impl Into<String>) -> Self {
        self.installer_name = installer_name.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = if tags.is_empty() { None } else { Some(tags) };
        self
    }
}

/// The kind of call being made; decides HTTP method and how responses are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    List,
    Show,
    Delete,
}

impl OperationKind {
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::List => "list",
            OperationKind::Show => "show",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Body of the PUT request that creates an installer image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallerCreateBody {
    pub location: String,
    pub properties: InstallerProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallerProperties {
    #[serde(rename = "blob-storage-configuration")]
    pub blob_storage_configuration: BlobStorageConfiguration,
    /// Passed through verbatim from the user's YAML file
    #[serde(rename = "host-configuration")]
    pub host_configuration: serde_yaml::Value,
}

/// Where the service uploads the generated installer ISO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobStorageConfiguration {
    #[serde(rename = "account-url")]
    pub account_url: String,
    #[serde(rename = "container-name")]
    pub container_name: String,
    #[serde(rename = "blob-name")]
    pub blob_name: String,
}
