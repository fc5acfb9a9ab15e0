//! Installer image endpoint URLs

use crate::config::ApiSettings;

/// Resource type segment of installer image URLs
pub const INSTALLER_RESOURCE_TYPE: &str = "installerimage";

/// Builds provisioning API URLs from a fixed set of [`ApiSettings`].
///
/// Values are substituted as-is; no percent-encoding is applied.
#[derive(Debug, Clone, Default)]
pub struct EndpointBuilder {
    settings: ApiSettings,
}

impl EndpointBuilder {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Collection URL when `name` is `None`, singleton URL otherwise
    pub fn build(&self, subscription_id: &str, resource_group: &str, name: Option<&str>) -> String {
        let resource = match name {
            Some(name) => format!("{}/{}", INSTALLER_RESOURCE_TYPE, name),
            None => INSTALLER_RESOURCE_TYPE.to_string(),
        };

        format!(
            "{}subscriptions/{}/resourcegroups/{}/providers/{}/{}?api-version={}",
            self.settings.base_url(),
            subscription_id,
            resource_group,
            self.settings.resource_provider,
            resource,
            self.settings.api_version
        )
    }

    pub fn collection(&self, subscription_id: &str, resource_group: &str) -> String {
        self.build(subscription_id, resource_group, None)
    }

    pub fn singleton(&self, subscription_id: &str, resource_group: &str, name: &str) -> String {
        self.build(subscription_id, resource_group, Some(name))
    }
}

/// Blob endpoint of a storage account
pub fn storage_account_url(storage_account: &str) -> String {
    format!("https://{}.blob.core.windows.net/", storage_account)
}
