//! ARM endpoint handlers

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use paths::ApiVersion;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::{arm_error_code_from_status, arm_error_codes, arm_error_response};
use crate::store::{resource_group_id, ArmStore, Operation};

#[derive(Debug, Deserialize)]
pub struct ApiVersionQuery {
    #[serde(rename = "api-version")]
    api_version: Option<String>,
}

/// Record the request, apply injected delays and failures, and check the api-version
async fn preflight(
    store: &ArmStore,
    operation: Operation,
    path: &str,
    query: &ApiVersionQuery,
    expected: ApiVersion,
) -> Option<Response> {
    store.record(operation, path).await;

    if let Some(delay) = store.injected_delay(operation).await {
        tokio::time::sleep(delay).await;
    }

    if let Some(status) = store.injected_failure(operation).await {
        return Some(arm_error_response(
            status,
            arm_error_code_from_status(status),
            format!("Injected failure for {operation:?}"),
        ));
    }

    if query.api_version.as_deref() != Some(expected.as_str()) {
        return Some(arm_error_response(
            StatusCode::BAD_REQUEST,
            arm_error_codes::INVALID_API_VERSION,
            format!(
                "The api-version '{}' is invalid. The supported version is '{expected}'.",
                query.api_version.as_deref().unwrap_or_default()
            ),
        ));
    }

    None
}

/// GET managed application
pub async fn get_managed_application(
    State(store): State<ArmStore>,
    OriginalUri(uri): OriginalUri,
    Path((subscription_id, resource_group, name)): Path<(String, String, String)>,
    Query(query): Query<ApiVersionQuery>,
) -> Response {
    info!("  GET managed application: rg={}, name={}", resource_group, name);
    if let Some(response) = preflight(
        &store,
        Operation::ManagedApplicationGet,
        uri.path(),
        &query,
        ApiVersion::ManagedApplications,
    )
    .await
    {
        return response;
    }

    match store
        .managed_application(&subscription_id, &resource_group, &name)
        .await
    {
        Some(app) => Json(json!({
            "id": app.id,
            "name": app.name,
            "type": "Microsoft.Solutions/applications",
            "kind": "MarketPlace",
            "properties": {
                "managedResourceGroupId": app.managed_resource_group_id,
                "provisioningState": "Succeeded"
            }
        }))
        .into_response(),
        None => arm_error_response(
            StatusCode::NOT_FOUND,
            arm_error_codes::RESOURCE_NOT_FOUND,
            format!(
                "The Resource 'Microsoft.Solutions/applications/{name}' under resource group '{resource_group}' was not found."
            ),
        ),
    }
}

/// POST custom provider `config` action
pub async fn post_custom_provider_config(
    State(store): State<ArmStore>,
    OriginalUri(uri): OriginalUri,
    Path((subscription_id, resource_group)): Path<(String, String)>,
    Query(query): Query<ApiVersionQuery>,
) -> Response {
    info!("  POST custom provider config: managed rg={}", resource_group);
    if let Some(response) = preflight(
        &store,
        Operation::CustomProviderConfig,
        uri.path(),
        &query,
        ApiVersion::CustomProviders,
    )
    .await
    {
        return response;
    }

    let managed_resource_group_id = resource_group_id(&subscription_id, &resource_group);
    match store.client_config(&managed_resource_group_id).await {
        Some(client_config) => Json(json!({
            "client_config": client_config,
            "client_ca_file": ""
        }))
        .into_response(),
        None => arm_error_response(
            StatusCode::NOT_FOUND,
            arm_error_codes::RESOURCE_GROUP_NOT_FOUND,
            format!("Resource group '{resource_group}' could not be found."),
        ),
    }
}

/// GET managed cluster
pub async fn get_managed_cluster(
    State(store): State<ArmStore>,
    OriginalUri(uri): OriginalUri,
    Path((subscription_id, resource_group, name)): Path<(String, String, String)>,
    Query(query): Query<ApiVersionQuery>,
) -> Response {
    info!("  GET managed cluster: rg={}, name={}", resource_group, name);
    if let Some(response) = preflight(
        &store,
        Operation::ManagedClusterGet,
        uri.path(),
        &query,
        ApiVersion::ManagedClusters,
    )
    .await
    {
        return response;
    }

    match store
        .managed_cluster(&subscription_id, &resource_group, &name)
        .await
    {
        Some(cluster) => Json(json!({
            "id": cluster.id,
            "name": cluster.name,
            "type": "Microsoft.ContainerService/ManagedClusters",
            "properties": {
                "provisioningState": "Succeeded",
                "kubernetesVersion": "1.30.0",
                "fqdn": cluster.fqdn
            }
        }))
        .into_response(),
        None => arm_error_response(
            StatusCode::NOT_FOUND,
            arm_error_codes::RESOURCE_NOT_FOUND,
            format!(
                "The Resource 'Microsoft.ContainerService/managedClusters/{name}' under resource group '{resource_group}' was not found."
            ),
        ),
    }
}

/// Health check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
