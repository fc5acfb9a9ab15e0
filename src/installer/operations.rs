//! Installer image operations
//!
//! Each operation builds exactly one installer request, sends it once
//! through the configured [`Transport`] and interprets the response. Create
//! may first look up the resource group location when none was given.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::endpoint::EndpointBuilder;
use super::host_config::load_host_config;
use super::location::resolve_location;
use super::models::{InstallerRequestParams, OperationKind};
use super::request::{build_create_request, build_delete_request, build_read_request, RequestEnvelope};
use super::response::{interpret, ResponseOutcome};
use super::transport::Transport;
use crate::auth::provider::{CredentialProvider, MANAGEMENT_SCOPE};
use crate::error::Result;

/// Trait for installer image operations
#[async_trait]
pub trait InstallerOperations: Send + Sync {
    /// Create or replace an installer image
    async fn create_installer(&self, params: &InstallerRequestParams) -> Result<ResponseOutcome>;

    /// List installer images in a resource group
    async fn list_installers(&self, resource_group: &str) -> Result<ResponseOutcome>;

    /// Get a single installer image
    async fn show_installer(&self, resource_group: &str, installer_name: &str) -> Result<ResponseOutcome>;

    /// Delete an installer image
    async fn delete_installer(&self, resource_group: &str, installer_name: &str) -> Result<ResponseOutcome>;
}

/// Installer operations against the provisioning REST API
pub struct InstallerClient {
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn Transport>,
    endpoints: EndpointBuilder,
    subscription_id: String,
    default_location: String,
}

impl InstallerClient {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn Transport>,
        endpoints: EndpointBuilder,
        subscription_id: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            transport,
            endpoints,
            subscription_id: subscription_id.into(),
            default_location: String::new(),
        }
    }

    /// Location used when neither `--location` nor the resource group lookup yields one
    pub fn with_default_location(mut self, default_location: impl Into<String>) -> Self {
        self.default_location = default_location.into();
        self
    }

    /// Access token for Azure Resource Manager
    async fn get_management_token(&self) -> Result<String> {
        self.credentials.get_token(MANAGEMENT_SCOPE).await
    }

    async fn execute(&self, kind: OperationKind, request: RequestEnvelope) -> Result<ResponseOutcome> {
        debug!(
            "Sending {} request {}",
            kind,
            request.request_id().unwrap_or_default()
        );
        let response = self.transport.send(request).await?;
        interpret(kind, response.status, &response.body)
    }
}

#[async_trait]
impl InstallerOperations for InstallerClient {
    async fn create_installer(&self, params: &InstallerRequestParams) -> Result<ResponseOutcome> {
        let host_config = load_host_config(&params.host_config_path).await?;
        // Fail on a missing key before a token is requested
        host_config.host_configuration()?;

        let token = self.get_management_token().await?;
        let location = resolve_location(
            params.location.clone(),
            self.transport.as_ref(),
            self.endpoints.settings(),
            &token,
            &self.subscription_id,
            &params.resource_group,
            &self.default_location,
        )
        .await?;
        let url = self.endpoints.singleton(
            &self.subscription_id,
            &params.resource_group,
            &params.installer_name,
        );

        info!(
            "Creating installer image '{}' in resource group '{}' ({})",
            params.installer_name, params.resource_group, location
        );
        let request = build_create_request(url, &location, params, &host_config, &token)?;
        self.execute(OperationKind::Create, request).await
    }

    async fn list_installers(&self, resource_group: &str) -> Result<ResponseOutcome> {
        let token = self.get_management_token().await?;
        let url = self.endpoints.collection(&self.subscription_id, resource_group);
        let request = build_read_request(url, &token)?;
        self.execute(OperationKind::List, request).await
    }

    async fn show_installer(&self, resource_group: &str, installer_name: &str) -> Result<ResponseOutcome> {
        let token = self.get_management_token().await?;
        let url = self
            .endpoints
            .singleton(&self.subscription_id, resource_group, installer_name);
        let request = build_read_request(url, &token)?;
        self.execute(OperationKind::Show, request).await
    }

    async fn delete_installer(&self, resource_group: &str, installer_name: &str) -> Result<ResponseOutcome> {
        let token = self.get_management_token().await?;
        let url = self
            .endpoints
            .singleton(&self.subscription_id, resource_group, installer_name);
        let request = build_delete_request(url, &token)?;
        self.execute(OperationKind::Delete, request).await
    }
}
