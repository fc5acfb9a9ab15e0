//! Resource group location lookup
//!
//! Used when `--location` is not given: the installer image is created in
//! the same region as its resource group.

use serde::Deserialize;
use tracing::{debug, warn};

use super::request::build_read_request;
use super::transport::Transport;
use crate::config::ApiSettings;
use crate::error::{MarinerError, Result};

pub const RESOURCE_GROUP_API_VERSION: &str = "2021-04-01";

#[derive(Debug, Deserialize)]
struct ResourceGroup {
    location: String,
}

/// ARM URL of a resource group
pub fn resource_group_url(settings: &ApiSettings, subscription_id: &str, resource_group: &str) -> String {
    format!(
        "{}subscriptions/{}/resourcegroups/{}?api-version={}",
        settings.arm_base_url(),
        subscription_id,
        resource_group,
        RESOURCE_GROUP_API_VERSION
    )
}

/// Look up the location of `resource_group` through Azure Resource Manager
pub async fn resource_group_location(
    transport: &dyn Transport,
    settings: &ApiSettings,
    token: &str,
    subscription_id: &str,
    resource_group: &str,
) -> Result<String> {
    let url = resource_group_url(settings, subscription_id, resource_group);
    let request = build_read_request(url, token)?;
    let response = transport.send(request).await?;

    if response.status != 200 {
        return Err(MarinerError::config(format!(
            "Unable to determine location of resource group '{}' (status code {})",
            resource_group, response.status
        )));
    }

    let group: ResourceGroup = serde_json::from_str(&response.body).map_err(|e| {
        MarinerError::serialization(format!("Failed to parse resource group response: {}", e))
    })?;
    debug!("Resource group '{}' is in {}", resource_group, group.location);
    Ok(group.location)
}

/// Location to create the installer in.
/// Priority: explicit location > resource group location > configured default
pub async fn resolve_location(
    explicit: Option<String>,
    transport: &dyn Transport,
    settings: &ApiSettings,
    token: &str,
    subscription_id: &str,
    resource_group: &str,
    default_location: &str,
) -> Result<String> {
    if let Some(location) = explicit.filter(|l| !l.trim().is_empty()) {
        return Ok(location);
    }

    match resource_group_location(transport, settings, token, subscription_id, resource_group).await {
        Ok(location) => Ok(location),
        Err(e) if !default_location.is_empty() => {
            warn!("{}; falling back to default location {}", e, default_location);
            Ok(default_location.to_string())
        }
        Err(e) => Err(e),
    }
}
