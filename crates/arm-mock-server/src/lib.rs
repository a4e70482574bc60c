//! ARM Mock Server
//!
//! A lightweight Axum-based HTTP server that mocks the Azure Resource Manager
//! endpoints read by the agent Helm config data source:
//!
//! - `GET` managed applications (`Microsoft.Solutions/applications`)
//! - `POST` the HCS custom provider `config` action
//! - `GET` managed clusters (`Microsoft.ContainerService/managedClusters`)
//!
//! Routes come from the shared `paths` crate so client and mock cannot drift.
//! Every request must carry a bearer token and the expected `api-version`.

pub mod errors;
pub mod handlers;
pub mod store;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use store::{
    resource_group_id, ArmStore, Fixtures, ManagedApplicationRecord, ManagedClusterRecord,
    Operation, RecordedRequest,
};

use errors::{arm_error_codes, arm_error_response};

/// Reject requests without a bearer token, like ARM does
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());

    if !authorized {
        warn!("Rejecting unauthenticated request to {}", request.uri().path());
        return arm_error_response(
            StatusCode::UNAUTHORIZED,
            arm_error_codes::AUTHENTICATION_FAILED,
            "Authentication failed. The 'Authorization' header is missing.".to_string(),
        );
    }

    next.run(request).await
}

/// Build the mock ARM router
pub fn router(store: ArmStore) -> Router {
    let arm = Router::new()
        .route(
            paths::azure::MANAGED_APPLICATION_ROUTE,
            get(handlers::get_managed_application),
        )
        .route(
            paths::azure::CUSTOM_PROVIDER_CONFIG_ROUTE,
            post(handlers::post_custom_provider_config),
        )
        .route(
            paths::azure::MANAGED_CLUSTER_ROUTE,
            get(handlers::get_managed_cluster),
        )
        .layer(axum::middleware::from_fn(auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(arm)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Bind to an ephemeral localhost port and serve in the background
///
/// Returns the base URL (e.g. `http://127.0.0.1:43123`) and the server task.
///
/// # Errors
/// Returns an error if the listener cannot be bound.
pub async fn spawn(store: ArmStore) -> anyhow::Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    let app = router(store);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warn!("ARM mock server stopped: {}", e);
        }
    });

    info!("ARM mock server listening on {}", addr);
    Ok((format!("http://{addr}"), handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    async fn server() -> (TestServer, ArmStore) {
        let store = ArmStore::new();
        store
            .add_managed_application("sub", "rg", "app", "mrg-app")
            .await;
        store
            .set_client_config(
                "/subscriptions/sub/resourceGroups/mrg-app",
                r#"{"datacenter":"dc1","retry_join":["10.0.0.1"]}"#.to_string(),
            )
            .await;
        store
            .add_managed_cluster("sub", "rg", "aks", "aks.example.com")
            .await;
        (TestServer::new(router(store.clone())).unwrap(), store)
    }

    #[tokio::test]
    async fn test_get_managed_application() {
        let (server, _) = server().await;
        let response = server
            .get(&paths::managed_application_path("sub", "rg", "app"))
            .add_query_param("api-version", "2019-07-01")
            .authorization_bearer("token")
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["properties"]["managedResourceGroupId"],
            "/subscriptions/sub/resourceGroups/mrg-app"
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let (server, store) = server().await;
        let response = server
            .get(&paths::managed_application_path("sub", "rg", "app"))
            .add_query_param("api-version", "2019-07-01")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(store.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_api_version_is_rejected() {
        let (server, _) = server().await;
        let response = server
            .get(&paths::managed_cluster_path("sub", "rg", "aks"))
            .add_query_param("api-version", "2019-07-01")
            .authorization_bearer("token")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "InvalidApiVersionParameter");
    }

    #[tokio::test]
    async fn test_custom_provider_config() {
        let (server, _) = server().await;
        let response = server
            .post(&paths::custom_provider_config_path(
                "/subscriptions/sub/resourceGroups/mrg-app",
            ))
            .add_query_param("api-version", "2018-09-01-preview")
            .authorization_bearer("token")
            .json(&serde_json::json!({}))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["client_config"],
            r#"{"datacenter":"dc1","retry_join":["10.0.0.1"]}"#
        );
    }

    #[tokio::test]
    async fn test_unknown_cluster_is_not_found() {
        let (server, _) = server().await;
        let response = server
            .get(&paths::managed_cluster_path("sub", "rg", "missing"))
            .add_query_param("api-version", "2020-09-01")
            .authorization_bearer("token")
            .await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "ResourceNotFound");
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let (server, store) = server().await;
        store
            .fail_operation(Operation::ManagedApplicationGet, StatusCode::FORBIDDEN)
            .await;
        let response = server
            .get(&paths::managed_application_path("sub", "rg", "app"))
            .add_query_param("api-version", "2019-07-01")
            .authorization_bearer("token")
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(store.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_encoded_names_are_decoded() {
        let (server, store) = server().await;
        store
            .add_managed_cluster("sub", "rg(1)", "my aks", "spaced.example.com")
            .await;
        let response = server
            .get(&paths::managed_cluster_path("sub", "rg(1)", "my aks"))
            .add_query_param("api-version", "2020-09-01")
            .authorization_bearer("token")
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["properties"]["fqdn"], "spaced.example.com");
    }
}
