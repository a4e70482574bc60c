//! # Managed Cluster Lookup

use crate::provider::ManagedClusterProvider;
use async_trait::async_trait;
use paths::{managed_cluster_path, ApiVersion};
use tracing::{info_span, Instrument};

use super::{ArmClient, ArmError, ManagedCluster};

#[async_trait]
impl ManagedClusterProvider for ArmClient {
    async fn get_managed_cluster(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ManagedCluster, ArmError> {
        let span = info_span!(
            "azure.managed_cluster.get",
            resource_group = resource_group,
            cluster.name = name
        );
        let path = managed_cluster_path(&self.subscription_id, resource_group, name);
        self.get_json("managed_cluster.get", &path, ApiVersion::ManagedClusters)
            .instrument(span)
            .await
    }
}
