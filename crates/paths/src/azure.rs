//! # Azure Resource Manager Paths
//!
//! Paths for the three ARM operations used to assemble an agent Helm config:
//!
//! - `GET` managed application (`Microsoft.Solutions/applications`)
//! - `POST` cluster config action on the HCS custom resource provider
//!   (`Microsoft.CustomProviders/resourceProviders/public/config`)
//! - `GET` managed cluster (`Microsoft.ContainerService/managedClusters`)
//!
//! Resource coordinates are percent-encoded as single path segments, so a name
//! containing `/`, `?`, `#` or spaces can never address a different resource.
//! Axum's `Path` extractor decodes them again on the mock side.

use std::borrow::Cow;

/// ARM api-version query values, one per resource provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// `Microsoft.Solutions/applications`
    ManagedApplications,
    /// `Microsoft.CustomProviders/resourceProviders`
    CustomProviders,
    /// `Microsoft.ContainerService/managedClusters`
    ManagedClusters,
}

impl ApiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::ManagedApplications => "2019-07-01",
            ApiVersion::CustomProviders => "2018-09-01-preview",
            ApiVersion::ManagedClusters => "2020-09-01",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the custom resource provider HCS installs in the managed resource group
pub const CUSTOM_PROVIDER_NAME: &str = "public";

/// Axum route for the managed application lookup
pub const MANAGED_APPLICATION_ROUTE: &str = "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Solutions/applications/{name}";

/// Axum route for the custom provider `config` action
pub const CUSTOM_PROVIDER_CONFIG_ROUTE: &str = "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.CustomProviders/resourceProviders/public/config";

/// Axum route for the managed cluster lookup
pub const MANAGED_CLUSTER_ROUTE: &str = "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.ContainerService/managedClusters/{name}";

/// Percent-encode one path segment
///
/// Everything except RFC 3986 unreserved characters is escaped. A segment that
/// is exactly `.` or `..` is still collapsed by URL parsers even when escaped,
/// so callers must reject those names before building a path.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Path of a managed application resource
pub fn managed_application_path(subscription_id: &str, resource_group: &str, name: &str) -> String {
    format!(
        "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Solutions/applications/{}",
        encode_segment(subscription_id),
        encode_segment(resource_group),
        encode_segment(name),
    )
}

/// Path of the `config` action exposed by the custom provider inside a managed resource group
///
/// `managed_resource_group_id` is the full ARM id returned on the managed application,
/// e.g. `/subscriptions/{sub}/resourceGroups/{mrg}`.
pub fn custom_provider_config_path(managed_resource_group_id: &str) -> String {
    let id = managed_resource_group_id.trim_end_matches('/');
    let separator = if id.starts_with('/') { "" } else { "/" };
    format!(
        "{separator}{id}/providers/Microsoft.CustomProviders/resourceProviders/{CUSTOM_PROVIDER_NAME}/config"
    )
}

/// Path of a managed (AKS) cluster resource
pub fn managed_cluster_path(subscription_id: &str, resource_group: &str, name: &str) -> String {
    format!(
        "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ContainerService/managedClusters/{}",
        encode_segment(subscription_id),
        encode_segment(resource_group),
        encode_segment(name),
    )
}
