//! # agent-helm-config
//!
//! Command-line front-end for the agent Helm config data source.
//!
//! ## Usage
//!
//! ```bash
//! # Print the Helm values for an AKS cluster in the same resource group as the HCS cluster
//! ARM_SUBSCRIPTION_ID=... agent-helm-config \
//!     --resource-group-name my-rg \
//!     --managed-application-name my-hcs \
//!     --aks-cluster-name my-aks
//!
//! # AKS cluster in another resource group, written to a file
//! agent-helm-config -g my-rg -a my-hcs -k my-aks --aks-resource-group aks-rg -o values.yaml
//! ```
//!
//! Connection settings come from the environment (`ARM_SUBSCRIPTION_ID`,
//! `ARM_ENDPOINT`, `ARM_CLIENT_ID`, `ARM_ACCESS_TOKEN`, `HCS_REQUEST_TIMEOUT_SECS`).

use anyhow::{Context, Result};
use clap::Parser;
use hcs_agent_helm_config::data_source::Diagnostic;
use hcs_agent_helm_config::observability::{logging, metrics};
use hcs_agent_helm_config::{
    AgentHelmConfigDataSource, AgentHelmConfigInputs, ArmClient, ProviderConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Render the Consul agent Helm config for an AKS cluster joining an HCS cluster
#[derive(Parser, Debug)]
#[command(name = "agent-helm-config", version)]
#[command(about = "Render the Consul agent Helm config for an AKS cluster", long_about = None)]
struct Cli {
    /// Resource group of the HCS managed application
    #[arg(short = 'g', long)]
    resource_group_name: String,

    /// Name of the HCS managed application
    #[arg(short = 'a', long)]
    managed_application_name: String,

    /// Name of the AKS cluster
    #[arg(short = 'k', long)]
    aks_cluster_name: String,

    /// Resource group of the AKS cluster (defaults to --resource-group-name)
    #[arg(long)]
    aks_resource_group: Option<String>,

    /// Write the config to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the computed id to stderr
    #[arg(long)]
    show_id: bool,

    /// Print Prometheus metrics to stderr after the read
    #[arg(long)]
    print_metrics: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn inputs(&self) -> AgentHelmConfigInputs {
        let inputs = AgentHelmConfigInputs::new(
            self.resource_group_name.clone(),
            self.managed_application_name.clone(),
            self.aks_cluster_name.clone(),
        );
        match &self.aks_resource_group {
            Some(aks_resource_group) => inputs.with_aks_resource_group(aks_resource_group.clone()),
            None => inputs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Configure rustls crypto provider FIRST, before any other operations
    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    logging::init_tracing(cli.verbose);

    let inputs = cli.inputs();
    let config = ProviderConfig::from_env().context("Failed to load Azure configuration")?;
    info!(
        "Using ARM endpoint {} (subscription {})",
        config.endpoint, config.subscription_id
    );

    let client = ArmClient::new(&config).context("Failed to create ARM client")?;
    let data_source = AgentHelmConfigDataSource::from_arm_client(Arc::new(client));

    let result = data_source.read(&inputs).await;

    if cli.print_metrics {
        eprint!("{}", metrics::gather_metrics());
    }

    let state = match result {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", Diagnostic::from(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(path) = &cli.output {
        std::fs::write(path, &state.config)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        info!("Wrote agent Helm config to {}", path.display());
    } else {
        println!("{}", state.config);
    }

    if cli.show_id {
        eprintln!("{}", state.id);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_inputs() {
        let cli = Cli::parse_from([
            "agent-helm-config",
            "-g",
            "rg",
            "-a",
            "app",
            "-k",
            "aks",
            "--aks-resource-group",
            "aks-rg",
        ]);
        let inputs = cli.inputs();
        assert_eq!(inputs.resource_group_name, "rg");
        assert_eq!(inputs.effective_aks_resource_group(), "aks-rg");
    }

    #[test]
    fn test_cli_requires_inputs() {
        assert!(Cli::try_parse_from(["agent-helm-config", "-g", "rg"]).is_err());
        assert!(Cli::try_parse_from(["agent-helm-config", "-g", "rg", "-a", "app", "-k", "aks"]).is_ok());
    }
}
