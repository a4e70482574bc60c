//! # Agent Helm Config Data Source
//!
//! Reads the Consul agent Helm values for an AKS cluster that should join an
//! HCS cluster:
//!
//! 1. Look up the HCS managed application
//! 2. Fetch the Consul client config from the managed resource group
//! 3. Look up the AKS cluster (in `aks_resource_group`, or the application's resource group)
//! 4. Render the Helm values and compute the id
//!
//! Lookups run one after the other and are never retried. Any failure aborts
//! the read without producing state.

mod error;
mod schema;
pub mod validation;

use crate::constants::AGENT_HELM_CONFIG_ID_SUFFIX;
use crate::helm::{ClusterConfig, RenderInputs};
use crate::observability::metrics;
use crate::provider::{
    ArmClient, ArmError, ClusterConfigProvider, ManagedApplicationProvider, ManagedClusterProvider,
};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

pub use error::{Diagnostic, ReadError, ResourceKind, Severity};
pub use schema::{
    schema, AgentHelmConfigInputs, AgentHelmConfigState, Attribute, AttributeMode,
    AKS_CLUSTER_NAME, AKS_RESOURCE_GROUP, CONFIG, ID, MANAGED_APPLICATION_NAME,
    RESOURCE_GROUP_NAME,
};

/// The `hcs_agent_helm_config` data source
pub struct AgentHelmConfigDataSource {
    managed_applications: Arc<dyn ManagedApplicationProvider>,
    cluster_configs: Arc<dyn ClusterConfigProvider>,
    managed_clusters: Arc<dyn ManagedClusterProvider>,
}

impl std::fmt::Debug for AgentHelmConfigDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHelmConfigDataSource")
            .finish_non_exhaustive()
    }
}

impl AgentHelmConfigDataSource {
    pub fn new(
        managed_applications: Arc<dyn ManagedApplicationProvider>,
        cluster_configs: Arc<dyn ClusterConfigProvider>,
        managed_clusters: Arc<dyn ManagedClusterProvider>,
    ) -> Self {
        Self {
            managed_applications,
            cluster_configs,
            managed_clusters,
        }
    }

    /// Use one ARM client for all three lookups
    pub fn from_arm_client(client: Arc<ArmClient>) -> Self {
        Self::new(Arc::clone(&client) as _, Arc::clone(&client) as _, client)
    }

    /// Read the agent Helm config
    ///
    /// # Errors
    /// - [`ReadError::InvalidInput`] if an input fails validation
    /// - [`ReadError::NotFound`] if the managed application or AKS cluster does not exist
    /// - [`ReadError::Transport`] if an upstream call fails
    /// - [`ReadError::MalformedUpstreamData`] if an upstream payload has the wrong shape
    pub async fn read(
        &self,
        inputs: &AgentHelmConfigInputs,
    ) -> Result<AgentHelmConfigState, ReadError> {
        let span = info_span!(
            "data_source.agent_helm_config.read",
            resource_group = %inputs.resource_group_name,
            application.name = %inputs.managed_application_name,
            aks.cluster = %inputs.aks_cluster_name
        );

        let result = self.read_inner(inputs).instrument(span).await;
        match &result {
            Ok(_) => metrics::record_read("success"),
            Err(e) => {
                warn!("Agent Helm config read failed: {}", e);
                metrics::record_read(e.kind());
            }
        }
        result
    }

    async fn read_inner(
        &self,
        inputs: &AgentHelmConfigInputs,
    ) -> Result<AgentHelmConfigState, ReadError> {
        inputs.validate()?;

        let resource_group = inputs.resource_group_name.as_str();
        let app_name = inputs.managed_application_name.as_str();

        let app = self
            .managed_applications
            .get_managed_application(resource_group, app_name)
            .await
            .map_err(|e| {
                lookup_error(
                    e,
                    ResourceKind::HcsCluster,
                    app_name,
                    resource_group,
                    format!(
                        "failed to check for presence of existing HCS Cluster (Managed Application {app_name:?}) (Resource Group {resource_group:?})"
                    ),
                )
            })?;

        let app_id = app.id.ok_or_else(|| ReadError::MalformedUpstreamData {
            context: format!("managed application {app_name:?}"),
            message: "response has no id".to_string(),
        })?;
        let managed_resource_group_id = app
            .properties
            .managed_resource_group_id
            .ok_or_else(|| ReadError::MalformedUpstreamData {
                context: format!("managed application {app_name:?}"),
                message: "response has no managedResourceGroupId".to_string(),
            })?;
        debug!(
            "Managed application {} uses managed resource group {}",
            app_id, managed_resource_group_id
        );

        let config_response = self
            .cluster_configs
            .get_cluster_config(&managed_resource_group_id)
            .await
            .map_err(|source| ReadError::Transport {
                context: format!("failed to get config for managed app {app_name:?}"),
                source,
            })?;

        let cluster_config = ClusterConfig::from_json(&config_response.client_config).map_err(
            |e| ReadError::MalformedUpstreamData {
                context: "failed to json unmarshal Consul config".to_string(),
                message: e.to_string(),
            },
        )?;

        let aks_resource_group = inputs.effective_aks_resource_group();
        let aks_cluster_name = inputs.aks_cluster_name.as_str();

        let cluster = self
            .managed_clusters
            .get_managed_cluster(aks_resource_group, aks_cluster_name)
            .await
            .map_err(|e| {
                lookup_error(
                    e,
                    ResourceKind::AksCluster,
                    aks_cluster_name,
                    aks_resource_group,
                    format!(
                        "failed to check for presence of existing AKS Cluster (Cluster name {aks_cluster_name:?}) (Resource Group {aks_resource_group:?})"
                    ),
                )
            })?;

        let fqdn = cluster
            .properties
            .fqdn
            .ok_or_else(|| ReadError::MalformedUpstreamData {
                context: format!("AKS cluster {aks_cluster_name:?}"),
                message: "response has no fqdn".to_string(),
            })?;

        let config = RenderInputs::new(app_name, cluster_config, fqdn).render();

        info!(
            "Rendered agent Helm config for {} (AKS cluster {}/{})",
            app_name, aks_resource_group, aks_cluster_name
        );

        Ok(AgentHelmConfigState {
            id: format!("{app_id}/{AGENT_HELM_CONFIG_ID_SUFFIX}"),
            config,
            inputs: inputs.clone(),
        })
    }
}

/// Split a lookup failure into NotFound and Transport
fn lookup_error(
    error: ArmError,
    kind: ResourceKind,
    name: &str,
    resource_group: &str,
    context: String,
) -> ReadError {
    if error.is_not_found() {
        ReadError::NotFound {
            kind,
            name: name.to_string(),
            resource_group: resource_group.to_string(),
        }
    } else {
        ReadError::Transport {
            context,
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::azure::{ManagedApplicationProperties, ManagedClusterProperties};
    use crate::provider::{ClusterConfigResponse, ManagedApplication, ManagedCluster};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory upstream that records every lookup
    #[derive(Default)]
    struct FakeUpstream {
        app_missing: bool,
        cluster_missing: bool,
        client_config: String,
        calls: Mutex<Vec<String>>,
    }

    impl FakeUpstream {
        fn new() -> Self {
            Self {
                client_config: r#"{"datacenter":"dc1","retry_join":["1.2.3.4"]}"#.to_string(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn not_found(operation: &'static str) -> ArmError {
        ArmError::NotFound {
            operation,
            path: "/".to_string(),
        }
    }

    #[async_trait]
    impl ManagedApplicationProvider for FakeUpstream {
        async fn get_managed_application(
            &self,
            resource_group: &str,
            name: &str,
        ) -> Result<ManagedApplication, ArmError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("app:{resource_group}/{name}"));
            if self.app_missing {
                return Err(not_found("managed_application.get"));
            }
            Ok(ManagedApplication {
                id: Some(format!("/subscriptions/s/resourceGroups/{resource_group}/providers/Microsoft.Solutions/applications/{name}")),
                name: Some(name.to_string()),
                properties: ManagedApplicationProperties {
                    managed_resource_group_id: Some("/subscriptions/s/resourceGroups/mrg".to_string()),
                    provisioning_state: None,
                },
            })
        }
    }

    #[async_trait]
    impl ClusterConfigProvider for FakeUpstream {
        async fn get_cluster_config(
            &self,
            managed_resource_group_id: &str,
        ) -> Result<ClusterConfigResponse, ArmError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("config:{managed_resource_group_id}"));
            Ok(ClusterConfigResponse {
                client_config: self.client_config.clone(),
                client_ca_file: None,
            })
        }
    }

    #[async_trait]
    impl ManagedClusterProvider for FakeUpstream {
        async fn get_managed_cluster(
            &self,
            resource_group: &str,
            name: &str,
        ) -> Result<ManagedCluster, ArmError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("aks:{resource_group}/{name}"));
            if self.cluster_missing {
                return Err(not_found("managed_cluster.get"));
            }
            Ok(ManagedCluster {
                id: None,
                name: Some(name.to_string()),
                properties: ManagedClusterProperties {
                    fqdn: Some("cluster.example.com".to_string()),
                    kubernetes_version: None,
                },
            })
        }
    }

    fn data_source(upstream: &Arc<FakeUpstream>) -> AgentHelmConfigDataSource {
        AgentHelmConfigDataSource::new(
            Arc::clone(upstream) as _,
            Arc::clone(upstream) as _,
            Arc::clone(upstream) as _,
        )
    }

    #[tokio::test]
    async fn test_read_calls_lookups_in_order() {
        let upstream = Arc::new(FakeUpstream::new());
        let state = data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "MyApp", "aks"))
            .await
            .unwrap();

        assert_eq!(
            upstream.calls(),
            vec![
                "app:rg/MyApp",
                "config:/subscriptions/s/resourceGroups/mrg",
                "aks:rg/aks"
            ]
        );
        assert_eq!(
            state.id,
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Solutions/applications/MyApp/agent-helm-config"
        );
        assert!(state.config.contains("secretName: myapp-bootstrap-token"));
        assert!(state.config.contains("k8sAuthMethodHost: https://cluster.example.com:443"));
    }

    #[tokio::test]
    async fn test_read_uses_aks_resource_group_override() {
        let upstream = Arc::new(FakeUpstream::new());
        data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "app", "aks").with_aks_resource_group("aks-rg"))
            .await
            .unwrap();
        assert_eq!(upstream.calls().last().map(String::as_str), Some("aks:aks-rg/aks"));
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_calls() {
        let upstream = Arc::new(FakeUpstream::new());
        let err = data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "app", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_application_stops_read() {
        let upstream = Arc::new(FakeUpstream {
            app_missing: true,
            ..FakeUpstream::new()
        });
        let err = data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "app", "aks"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(upstream.calls(), vec!["app:rg/app"]);
    }

    #[tokio::test]
    async fn test_missing_cluster_reports_effective_resource_group() {
        let upstream = Arc::new(FakeUpstream {
            cluster_missing: true,
            ..FakeUpstream::new()
        });
        let err = data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "app", "aks").with_aks_resource_group("aks-rg"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"no AKS Cluster found for (Cluster name "aks") (Resource Group "aks-rg")."#
        );
    }

    #[tokio::test]
    async fn test_malformed_client_config() {
        let upstream = Arc::new(FakeUpstream {
            client_config: r#"{"datacenter": 1}"#.to_string(),
            ..FakeUpstream::new()
        });
        let err = data_source(&upstream)
            .read(&AgentHelmConfigInputs::new("rg", "app", "aks"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_data");
        assert!(err.to_string().starts_with("failed to json unmarshal Consul config"));
        // The cluster lookup is never reached
        assert_eq!(upstream.calls().len(), 2);
    }
}
