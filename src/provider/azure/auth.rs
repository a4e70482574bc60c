//! # Azure Authentication
//!
//! Builds the token credential used for ARM requests: a static bearer token,
//! Workload Identity, or Managed Identity (the default).

use crate::config::AzureAuthConfig;
use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use azure_identity::{ManagedIdentityCredential, WorkloadIdentityCredential};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ArmError;

/// TokenCredential that always returns a pre-issued bearer token
///
/// Used with `ARM_ACCESS_TOKEN` and against the ARM mock server.
pub struct StaticTokenCredential {
    token: Secret,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
        }
    }
}

impl std::fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenCredential").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        use typespec_client_core::time::{Duration, OffsetDateTime};

        Ok(AccessToken::new(
            Secret::new(self.token.secret().to_string()),
            OffsetDateTime::now_utc() + Duration::seconds(3600),
        ))
    }
}

/// Create the Azure credential for the configured authentication method
///
/// # Errors
/// Returns [`ArmError::Credential`] if an identity credential cannot be constructed.
pub fn create_credential(auth: &AzureAuthConfig) -> Result<Arc<dyn TokenCredential>, ArmError> {
    let credential: Arc<dyn TokenCredential> = match auth {
        AzureAuthConfig::StaticToken { token } => {
            debug!("Using static ARM access token");
            Arc::new(StaticTokenCredential::new(token.clone()))
        }
        AzureAuthConfig::WorkloadIdentity { client_id } => {
            info!(
                "Using Azure Workload Identity authentication with client ID: {}",
                client_id
            );
            let options = azure_identity::WorkloadIdentityCredentialOptions {
                client_id: Some(client_id.clone()),
                ..Default::default()
            };
            WorkloadIdentityCredential::new(Some(options)).map_err(ArmError::Credential)?
        }
        AzureAuthConfig::ManagedIdentity => {
            info!("No client ID or access token configured, using Managed Identity");
            ManagedIdentityCredential::new(None).map_err(ArmError::Credential)?
        }
    };

    Ok(credential)
}

/// Get a bearer token for the given scope
pub(crate) async fn get_token(
    credential: &Arc<dyn TokenCredential>,
    scope: &str,
) -> Result<String, ArmError> {
    let token = credential
        .get_token(&[scope], Some(TokenRequestOptions::default()))
        .await
        .map_err(ArmError::Credential)?;
    Ok(token.token.secret().to_string())
}
