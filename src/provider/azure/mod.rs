//! # Azure Resource Manager Provider
//!
//! ARM implementation of the upstream lookups:
//! - managed applications (`Microsoft.Solutions`)
//! - the HCS custom resource provider `config` action (`Microsoft.CustomProviders`)
//! - managed clusters (`Microsoft.ContainerService`)
//!
//! All three share one [`ArmClient`].

mod auth;
mod client;
mod custom_provider;
mod error;
mod managed_application;
mod managed_cluster;
mod types;

pub use auth::{create_credential, StaticTokenCredential};
pub use client::ArmClient;
pub use error::ArmError;
pub use types::{
    ClusterConfigResponse, ManagedApplication, ManagedApplicationProperties, ManagedCluster,
    ManagedClusterProperties,
};
