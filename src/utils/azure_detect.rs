//! Azure CLI environment detection
//!
//! Reads the signed-in Azure CLI account to find the default subscription
//! when none is configured explicitly.

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Subset of `az account show` output
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant_id: String,
}

/// Query the current Azure CLI account, if the CLI is installed and signed in
pub async fn current_account() -> Option<AzureAccount> {
    let output = Command::new("az")
        .args(["account", "show", "--output", "json"])
        .output()
        .await
        .map_err(|e| debug!("Azure CLI not available: {}", e))
        .ok()?;

    if !output.status.success() {
        debug!(
            "'az account show' failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    parse_account(&output.stdout)
}

/// Default subscription of the signed-in Azure CLI user
pub async fn current_subscription_id() -> Option<String> {
    current_account().await.map(|account| account.id)
}

fn parse_account(stdout: &[u8]) -> Option<AzureAccount> {
    serde_json::from_slice::<AzureAccount>(stdout)
        .map_err(|e| debug!("Unable to parse Azure CLI account: {}", e))
        .ok()
        .filter(|account| !account.id.is_empty())
}
