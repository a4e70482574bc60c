//! # HCS Agent Helm Config
//!
//! Read-only data source that renders the Consul agent Helm values for an AKS
//! cluster joining an HCS (HashiCorp Consul Service on Azure) cluster.
//!
//! ## Overview
//!
//! A read:
//!
//! 1. **Looks up the managed application** - the HCS cluster, by resource group and name
//! 2. **Fetches the Consul client config** - datacenter and retry-join addresses, from the
//!    custom resource provider in the managed resource group
//! 3. **Looks up the AKS cluster** - for its API server FQDN
//! 4. **Renders the Helm values** - see [`helm::render_helm_config`]
//!
//! ## Usage
//!
//! ```no_run
//! use hcs_agent_helm_config::{AgentHelmConfigDataSource, AgentHelmConfigInputs, ArmClient, ProviderConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ProviderConfig::from_env()?;
//! let data_source = AgentHelmConfigDataSource::from_arm_client(Arc::new(ArmClient::new(&config)?));
//! let state = data_source
//!     .read(&AgentHelmConfigInputs::new("my-rg", "my-hcs", "my-aks"))
//!     .await?;
//! println!("{}", state.config);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod data_source;
pub mod helm;
pub mod observability;
pub mod provider;

pub use config::{AzureAuthConfig, ProviderConfig};
pub use data_source::{
    AgentHelmConfigDataSource, AgentHelmConfigInputs, AgentHelmConfigState, Diagnostic, ReadError,
};
pub use helm::{render_helm_config, ClusterConfig};
pub use provider::ArmClient;
