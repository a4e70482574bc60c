//! # Helm Values Rendering
//!
//! Renders the Consul agent Helm values for an AKS cluster that joins an HCS
//! managed application.

mod template;

pub use template::{format_join_list, render_helm_config};

/// Consul client configuration returned by the HCS custom resource provider
///
/// Deserialized from the `client_config` JSON document. Fields this data source
/// does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ClusterConfig {
    pub datacenter: String,
    /// Retry-join addresses, in the order the server returned them
    pub retry_join: Vec<String>,
}

impl ClusterConfig {
    /// Parse the `client_config` payload
    ///
    /// # Errors
    /// Returns the `serde_json` error if the payload is not a JSON object with a
    /// string `datacenter` and a string array `retry_join`.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Values substituted into the Helm template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInputs {
    pub application_name: String,
    pub datacenter: String,
    pub cluster_fqdn: String,
    pub join_addresses: Vec<String>,
}

impl RenderInputs {
    pub fn new(
        application_name: impl Into<String>,
        config: ClusterConfig,
        cluster_fqdn: impl Into<String>,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            datacenter: config.datacenter,
            cluster_fqdn: cluster_fqdn.into(),
            join_addresses: config.retry_join,
        }
    }

    pub fn render(&self) -> String {
        render_helm_config(
            &self.application_name,
            &self.datacenter,
            &self.cluster_fqdn,
            &self.join_addresses,
        )
    }
}
