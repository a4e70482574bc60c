//! In-memory ARM resource store
//!
//! Holds managed applications, their Consul client configs and AKS clusters.
//! ARM resource ids are case-insensitive, so every key is lowercased.

use axum::http::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// ARM operations served by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ManagedApplicationGet,
    CustomProviderConfig,
    ManagedClusterGet,
}

/// Stored managed application
#[derive(Debug, Clone)]
pub struct ManagedApplicationRecord {
    pub id: String,
    pub name: String,
    pub managed_resource_group_id: String,
}

/// Stored AKS cluster
#[derive(Debug, Clone)]
pub struct ManagedClusterRecord {
    pub id: String,
    pub name: String,
    pub fqdn: String,
}

/// One request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub operation: Operation,
    pub path: String,
}

#[derive(Debug, Default)]
struct Inner {
    applications: HashMap<String, ManagedApplicationRecord>,
    client_configs: HashMap<String, String>,
    clusters: HashMap<String, ManagedClusterRecord>,
    failures: HashMap<Operation, StatusCode>,
    delays: HashMap<Operation, Duration>,
    requests: Vec<RecordedRequest>,
}

/// Shared store handed to the router as state
#[derive(Debug, Clone, Default)]
pub struct ArmStore {
    inner: Arc<RwLock<Inner>>,
}

fn key(parts: &[&str]) -> String {
    parts.join("/").to_lowercase()
}

/// Full ARM id of a resource group
pub fn resource_group_id(subscription_id: &str, resource_group: &str) -> String {
    format!("/subscriptions/{subscription_id}/resourceGroups/{resource_group}")
}

impl ArmStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a managed application whose managed resource group is `managed_resource_group`
    pub async fn add_managed_application(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        managed_resource_group: &str,
    ) -> ManagedApplicationRecord {
        let record = ManagedApplicationRecord {
            id: format!(
                "{}/providers/Microsoft.Solutions/applications/{name}",
                resource_group_id(subscription_id, resource_group)
            ),
            name: name.to_string(),
            managed_resource_group_id: resource_group_id(subscription_id, managed_resource_group),
        };
        self.inner
            .write()
            .await
            .applications
            .insert(key(&[subscription_id, resource_group, name]), record.clone());
        record
    }

    /// Set the `client_config` returned by the custom provider in a managed resource group
    pub async fn set_client_config(&self, managed_resource_group_id: &str, client_config: String) {
        self.inner.write().await.client_configs.insert(
            managed_resource_group_id.trim_end_matches('/').to_lowercase(),
            client_config,
        );
    }

    pub async fn add_managed_cluster(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        fqdn: &str,
    ) -> ManagedClusterRecord {
        let record = ManagedClusterRecord {
            id: format!(
                "{}/providers/Microsoft.ContainerService/managedClusters/{name}",
                resource_group_id(subscription_id, resource_group)
            ),
            name: name.to_string(),
            fqdn: fqdn.to_string(),
        };
        self.inner
            .write()
            .await
            .clusters
            .insert(key(&[subscription_id, resource_group, name]), record.clone());
        record
    }

    /// Make every request for `operation` fail with `status`
    pub async fn fail_operation(&self, operation: Operation, status: StatusCode) {
        self.inner.write().await.failures.insert(operation, status);
    }

    /// Delay every response for `operation`
    pub async fn delay_operation(&self, operation: Operation, delay: Duration) {
        self.inner.write().await.delays.insert(operation, delay);
    }

    /// Requests received so far, in order
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.read().await.requests.clone()
    }

    pub(crate) async fn record(&self, operation: Operation, path: &str) {
        self.inner.write().await.requests.push(RecordedRequest {
            operation,
            path: path.to_string(),
        });
    }

    pub(crate) async fn injected_failure(&self, operation: Operation) -> Option<StatusCode> {
        self.inner.read().await.failures.get(&operation).copied()
    }

    pub(crate) async fn injected_delay(&self, operation: Operation) -> Option<Duration> {
        self.inner.read().await.delays.get(&operation).copied()
    }

    pub(crate) async fn managed_application(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Option<ManagedApplicationRecord> {
        self.inner
            .read()
            .await
            .applications
            .get(&key(&[subscription_id, resource_group, name]))
            .cloned()
    }

    pub(crate) async fn client_config(&self, managed_resource_group_id: &str) -> Option<String> {
        self.inner
            .read()
            .await
            .client_configs
            .get(&managed_resource_group_id.to_lowercase())
            .cloned()
    }

    pub(crate) async fn managed_cluster(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Option<ManagedClusterRecord> {
        self.inner
            .read()
            .await
            .clusters
            .get(&key(&[subscription_id, resource_group, name]))
            .cloned()
    }

    /// Load resources from fixtures
    pub async fn load(&self, fixtures: &Fixtures) {
        for app in &fixtures.applications {
            let record = self
                .add_managed_application(
                    &fixtures.subscription_id,
                    &app.resource_group,
                    &app.name,
                    &app.managed_resource_group,
                )
                .await;
            self.set_client_config(&record.managed_resource_group_id, app.client_config.to_string())
                .await;
        }
        for cluster in &fixtures.clusters {
            self.add_managed_cluster(
                &fixtures.subscription_id,
                &cluster.resource_group,
                &cluster.name,
                &cluster.fqdn,
            )
            .await;
        }
    }
}

/// Fixture file format for the `arm-mock-server` binary
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    pub subscription_id: String,
    #[serde(default)]
    pub applications: Vec<ApplicationFixture>,
    #[serde(default)]
    pub clusters: Vec<ClusterFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationFixture {
    pub resource_group: String,
    pub name: String,
    pub managed_resource_group: String,
    /// Consul client config, served JSON-encoded as `client_config`
    pub client_config: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterFixture {
    pub resource_group: String,
    pub name: String,
    pub fqdn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookups_are_case_insensitive() {
        let store = ArmStore::new();
        store
            .add_managed_application("sub", "My-RG", "MyApp", "mrg-myapp")
            .await;
        assert!(store.managed_application("SUB", "my-rg", "myapp").await.is_some());
    }

    #[tokio::test]
    async fn test_resource_ids_are_not_escaped() {
        let store = ArmStore::new();
        let cluster = store
            .add_managed_cluster("sub", "rg(1)", "my aks", "aks.example.com")
            .await;
        assert_eq!(
            cluster.id,
            "/subscriptions/sub/resourceGroups/rg(1)/providers/Microsoft.ContainerService/managedClusters/my aks"
        );
    }

    #[tokio::test]
    async fn test_load_fixtures() {
        let fixtures: Fixtures = serde_json::from_str(
            r#"{
                "subscription_id": "sub",
                "applications": [{
                    "resource_group": "rg",
                    "name": "app",
                    "managed_resource_group": "mrg-app",
                    "client_config": {"datacenter": "dc1", "retry_join": ["10.0.0.1"]}
                }],
                "clusters": [{"resource_group": "rg", "name": "aks", "fqdn": "aks.example.com"}]
            }"#,
        )
        .unwrap();
        let store = ArmStore::new();
        store.load(&fixtures).await;

        let config = store
            .client_config("/subscriptions/sub/resourceGroups/mrg-app")
            .await
            .unwrap();
        assert_eq!(config, r#"{"datacenter":"dc1","retry_join":["10.0.0.1"]}"#);
        assert_eq!(
            store.managed_cluster("sub", "rg", "aks").await.unwrap().fqdn,
            "aks.example.com"
        );
    }
}
