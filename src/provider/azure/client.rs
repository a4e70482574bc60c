//! # ARM Client
//!
//! Thin Azure Resource Manager REST client: bearer auth, api-version query,
//! status classification and JSON decoding. Requests are never retried.

use crate::config::ProviderConfig;
use crate::constants;
use crate::observability::metrics;
use azure_core::credentials::TokenCredential;
use paths::ApiVersion;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::auth::{create_credential, get_token};
use super::error::{status_error, ArmError};

/// Azure Resource Manager client shared by the three lookups
pub struct ArmClient {
    pub(crate) http_client: Client,
    pub(crate) endpoint: String,
    pub(crate) subscription_id: String,
    credential: Arc<dyn TokenCredential>,
    scope: String,
    timeout: Duration,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Create a client from provider configuration
    ///
    /// # Errors
    /// Returns an error if the credential or the HTTP client cannot be created.
    pub fn new(config: &ProviderConfig) -> Result<Self, ArmError> {
        let credential = create_credential(&config.auth)?;
        Self::with_credential(config, credential)
    }

    /// Create a client with an explicit credential
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_credential(
        config: &ProviderConfig,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Self, ArmError> {
        let http_client = Client::builder()
            .user_agent(constants::USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| ArmError::Request {
                operation: "client.build",
                source,
            })?;

        // Ensure endpoint doesn't have trailing slash
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let scope = format!("{}/.default", config.token_audience());

        Ok(Self {
            http_client,
            endpoint,
            subscription_id: config.subscription_id.clone(),
            credential,
            scope,
            timeout: config.request_timeout,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// `GET` an ARM resource
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        api_version: ApiVersion,
    ) -> Result<T, ArmError> {
        self.send(Method::GET, operation, path, api_version).await
    }

    /// `POST` an ARM action with an empty JSON body
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        api_version: ApiVersion,
    ) -> Result<T, ArmError> {
        self.send(Method::POST, operation, path, api_version).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        operation: &'static str,
        path: &str,
        api_version: ApiVersion,
    ) -> Result<T, ArmError> {
        let start = Instant::now();
        let result = self.execute(method, operation, path, api_version).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        metrics::record_upstream_request(operation, outcome, start.elapsed().as_secs_f64());
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        operation: &'static str,
        path: &str,
        api_version: ApiVersion,
    ) -> Result<T, ArmError> {
        let token = get_token(&self.credential, &self.scope).await?;
        let url = format!("{}{}", self.endpoint, path);
        debug!("{} {} (api-version={})", method, url, api_version);

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(token)
            .query(&[("api-version", api_version.as_str())]);
        if method == Method::POST {
            request = request.json(&serde_json::json!({}));
        }

        let response = request
            .send()
            .await
            .map_err(|source| self.request_error(operation, source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.request_error(operation, source))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ArmError::NotFound {
                operation,
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(status_error(operation, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| ArmError::Decode { operation, source })
    }

    fn request_error(&self, operation: &'static str, source: reqwest::Error) -> ArmError {
        if source.is_timeout() {
            ArmError::Timeout {
                operation,
                timeout: self.timeout,
            }
        } else {
            ArmError::Request { operation, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AzureAuthConfig;

    fn config(endpoint: &str) -> ProviderConfig {
        ProviderConfig {
            subscription_id: "sub".to_string(),
            endpoint: endpoint.to_string(),
            auth: AzureAuthConfig::StaticToken {
                token: "t".to_string(),
            },
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client = ArmClient::new(&config("https://management.azure.com/")).unwrap();
        assert_eq!(client.endpoint, "https://management.azure.com");
        assert_eq!(client.scope, "https://management.azure.com/.default");
    }

    #[test]
    fn test_custom_endpoint_uses_public_audience() {
        let client = ArmClient::new(&config("http://127.0.0.1:9999")).unwrap();
        assert_eq!(client.endpoint, "http://127.0.0.1:9999");
        assert_eq!(client.scope, "https://management.azure.com/.default");
    }
}
