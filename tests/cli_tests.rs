//! End-to-end tests for the `agent-helm-config` binary against the ARM mock server

use arm_mock_server::ArmStore;
use hcs_agent_helm_config::constants::env;
use tokio::process::Command;

const SUBSCRIPTION: &str = "11111111-1111-1111-1111-111111111111";

async fn mock_arm() -> String {
    let store = ArmStore::new();
    let app = store
        .add_managed_application(SUBSCRIPTION, "hcs-rg", "my-hcs", "mrg-my-hcs")
        .await;
    store
        .set_client_config(
            &app.managed_resource_group_id,
            r#"{"datacenter":"east","retry_join":["10.0.0.4","10.0.0.5"]}"#.to_string(),
        )
        .await;
    store
        .add_managed_cluster(SUBSCRIPTION, "hcs-rg", "my-aks", "my-aks.hcp.eastus.azmk8s.io")
        .await;

    let (endpoint, _handle) = arm_mock_server::spawn(store).await.unwrap();
    endpoint
}

fn agent_helm_config(endpoint: &str) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_agent-helm-config"));
    command
        .env(env::SUBSCRIPTION_ID, SUBSCRIPTION)
        .env(env::ENDPOINT, endpoint)
        .env(env::ACCESS_TOKEN, "test-token")
        .env_remove(env::CLIENT_ID)
        .env_remove(env::REQUEST_TIMEOUT_SECS);
    command
}

#[tokio::test]
async fn test_cli_writes_config_to_output_file() {
    let endpoint = mock_arm().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("values.yaml");

    let result = agent_helm_config(&endpoint)
        .args(["-g", "hcs-rg", "-a", "my-hcs", "-k", "my-aks", "--show-id", "-o"])
        .arg(&output)
        .output()
        .await
        .unwrap();

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let config = std::fs::read_to_string(&output).unwrap();
    assert!(config.contains("datacenter: east"));
    assert!(config.contains("hosts: ['10.0.0.4', '10.0.0.5']"));
    assert!(config.contains("k8sAuthMethodHost: https://my-aks.hcp.eastus.azmk8s.io:443"));

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains(
        "/resourceGroups/hcs-rg/providers/Microsoft.Solutions/applications/my-hcs/agent-helm-config"
    ));
}

#[tokio::test]
async fn test_cli_reports_missing_application() {
    let endpoint = mock_arm().await;

    let result = agent_helm_config(&endpoint)
        .args(["-g", "hcs-rg", "-a", "other-hcs", "-k", "my-aks"])
        .output()
        .await
        .unwrap();

    assert!(!result.status.success());
    assert!(result.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error: Resource not found"));
    assert!(stderr.contains(r#"(Managed Application "other-hcs")"#));
}
