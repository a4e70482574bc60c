//! # Upstream Providers
//!
//! Traits for the three lookups the data source depends on. The Azure
//! implementation lives in [`azure`]; tests substitute their own.

pub mod azure;

use async_trait::async_trait;

pub use azure::{
    ArmClient, ArmError, ClusterConfigResponse, ManagedApplication, ManagedCluster,
};

/// Managed application directory
#[async_trait]
pub trait ManagedApplicationProvider: Send + Sync {
    /// Look up a managed application by resource group and name
    async fn get_managed_application(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ManagedApplication, ArmError>;
}

/// Consul client configuration exposed inside the managed resource group
#[async_trait]
pub trait ClusterConfigProvider: Send + Sync {
    /// Fetch the client configuration for the HCS cluster in a managed resource group
    async fn get_cluster_config(
        &self,
        managed_resource_group_id: &str,
    ) -> Result<ClusterConfigResponse, ArmError>;
}

/// Managed (AKS) cluster directory
#[async_trait]
pub trait ManagedClusterProvider: Send + Sync {
    /// Look up an AKS cluster by resource group and name
    async fn get_managed_cluster(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ManagedCluster, ArmError>;
}
