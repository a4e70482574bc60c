//! # Azure Provider Settings

use crate::constants::{self, env};
use std::time::Duration;
use thiserror::Error;

/// Error loading provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Azure authentication method
#[derive(Clone, PartialEq, Eq)]
pub enum AzureAuthConfig {
    /// Pre-issued bearer token (`ARM_ACCESS_TOKEN`)
    StaticToken { token: String },
    /// Azure Workload Identity federated with the given client id (`ARM_CLIENT_ID`)
    WorkloadIdentity { client_id: String },
    /// Managed Identity of the host (AKS, VM, App Service)
    ManagedIdentity,
}

impl std::fmt::Debug for AzureAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AzureAuthConfig::StaticToken { .. } => f
                .debug_struct("StaticToken")
                .field("token", &"<redacted>")
                .finish(),
            AzureAuthConfig::WorkloadIdentity { client_id } => f
                .debug_struct("WorkloadIdentity")
                .field("client_id", client_id)
                .finish(),
            AzureAuthConfig::ManagedIdentity => f.write_str("ManagedIdentity"),
        }
    }
}

/// Azure Resource Manager connection settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Subscription holding the managed application and the AKS cluster
    pub subscription_id: String,
    /// ARM endpoint, without trailing slash
    pub endpoint: String,
    pub auth: AzureAuthConfig,
    /// Per-request timeout for ARM calls
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Create a configuration for the public cloud with Managed Identity
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            endpoint: constants::DEFAULT_ARM_ENDPOINT.to_string(),
            auth: AzureAuthConfig::ManagedIdentity,
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables with defaults
    ///
    /// # Errors
    /// Returns an error if `ARM_SUBSCRIPTION_ID` is unset or a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    /// Returns an error if the subscription id is missing or a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let subscription_id =
            get(env::SUBSCRIPTION_ID).ok_or(ConfigError::Missing(env::SUBSCRIPTION_ID))?;

        let endpoint = get(env::ENDPOINT)
            .unwrap_or_else(|| constants::DEFAULT_ARM_ENDPOINT.to_string());
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(ConfigError::Invalid {
                key: env::ENDPOINT,
                value: endpoint,
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let auth = if let Some(token) = get(env::ACCESS_TOKEN) {
            AzureAuthConfig::StaticToken { token }
        } else if let Some(client_id) = get(env::CLIENT_ID) {
            AzureAuthConfig::WorkloadIdentity { client_id }
        } else {
            AzureAuthConfig::ManagedIdentity
        };

        let request_timeout_secs = match get(env::REQUEST_TIMEOUT_SECS) {
            Some(value) => match value.trim().parse::<u64>().ok() {
                Some(0) | None => {
                    return Err(ConfigError::Invalid {
                        key: env::REQUEST_TIMEOUT_SECS,
                        value,
                        reason: "must be a positive number of seconds".to_string(),
                    })
                }
                Some(secs) => secs,
            },
            None => constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            subscription_id,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Audience used for the ARM token scope
    ///
    /// Sovereign clouds use their own `https://management.*` endpoint as audience;
    /// any other endpoint (proxies, the mock server) falls back to the public cloud.
    pub fn token_audience(&self) -> &str {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.starts_with("https://management.") {
            endpoint
        } else {
            constants::DEFAULT_ARM_ENDPOINT
        }
    }
}
