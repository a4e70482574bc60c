//! # ARM Response Types
//!
//! Subsets of the ARM resource bodies this data source reads. Everything else
//! in the payloads is ignored.

use serde::{Deserialize, Serialize};

/// `Microsoft.Solutions/applications` resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagedApplication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: ManagedApplicationProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedApplicationProperties {
    /// Full ARM id of the resource group the application manages
    #[serde(default)]
    pub managed_resource_group_id: Option<String>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

/// Response of the HCS custom provider `config` action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterConfigResponse {
    /// Consul client configuration, itself a JSON document
    pub client_config: String,
    /// Consul CA certificate, base64 encoded
    #[serde(default)]
    pub client_ca_file: Option<String>,
}

/// `Microsoft.ContainerService/managedClusters` resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagedCluster {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: ManagedClusterProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterProperties {
    /// API server FQDN
    #[serde(default)]
    pub fqdn: Option<String>,
    #[serde(default)]
    pub kubernetes_version: Option<String>,
}
