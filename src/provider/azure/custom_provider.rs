//! # HCS Custom Provider Config Action
//!
//! HCS installs a custom resource provider named `public` in the managed
//! resource group. Its `config` action returns the Consul client configuration
//! as an embedded JSON string.

use crate::provider::ClusterConfigProvider;
use async_trait::async_trait;
use paths::{custom_provider_config_path, ApiVersion};
use tracing::{info_span, Instrument};

use super::{ArmClient, ArmError, ClusterConfigResponse};

#[async_trait]
impl ClusterConfigProvider for ArmClient {
    async fn get_cluster_config(
        &self,
        managed_resource_group_id: &str,
    ) -> Result<ClusterConfigResponse, ArmError> {
        let span = info_span!(
            "azure.custom_provider.config",
            managed_resource_group = managed_resource_group_id
        );
        let path = custom_provider_config_path(managed_resource_group_id);
        self.post_json("custom_provider.config", &path, ApiVersion::CustomProviders)
            .instrument(span)
            .await
    }
}
