//! Credential provider trait and implementations
//!
//! The installer pipeline only needs a bearer token for Azure Resource
//! Manager; where that token comes from is hidden behind [`CredentialProvider`].

use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use std::sync::Arc;
use tracing::debug;

use crate::error::{MarinerError, Result};

/// OAuth scope for Azure Resource Manager
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// Source of bearer tokens for the current identity
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Get a raw access token for the given scope
    async fn get_token(&self, scope: &str) -> Result<String>;
}

/// Credential provider backed by `DefaultAzureCredential`
/// (environment, managed identity, Azure CLI, ...)
pub struct AzureCredentialProvider {
    credential: Arc<DefaultAzureCredential>,
}

impl AzureCredentialProvider {
    pub fn new() -> Result<Self> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .map_err(|e| {
                MarinerError::authentication(format!(
                    "Failed to create DefaultAzureCredential: {}",
                    e
                ))
            })?;

        Ok(Self {
            credential: Arc::new(credential),
        })
    }
}

#[async_trait]
impl CredentialProvider for AzureCredentialProvider {
    async fn get_token(&self, scope: &str) -> Result<String> {
        debug!("Requesting access token for scope {}", scope);
        let token = self.credential.get_token(&[scope]).await.map_err(|e| {
            MarinerError::authentication(format!(
                "Error retrieving AAD access token! Please log in and try again. ({})",
                e
            ))
        })?;

        let secret = token.token.secret().to_string();
        if secret.is_empty() {
            return Err(MarinerError::authentication(
                "Error retrieving AAD access token! Please log in and try again.",
            ));
        }

        Ok(secret)
    }
}

/// Pre-acquired token supplied on the command line or environment
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn get_token(&self, _scope: &str) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(MarinerError::authentication("Provided access token is empty"));
        }
        Ok(self.token.clone())
    }
}

/// Choose a credential provider: an explicit token wins over ambient credentials
pub fn create_credential_provider(access_token: Option<String>) -> Result<Arc<dyn CredentialProvider>> {
    match access_token {
        Some(token) => {
            debug!("Using access token supplied by the caller");
            Ok(Arc::new(StaticTokenProvider::new(token)))
        }
        None => Ok(Arc::new(AzureCredentialProvider::new()?)),
    }
}
