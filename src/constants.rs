//! # Constants
//!
//! Defaults and fixed values shared across the crate.

/// Default Azure Resource Manager endpoint (public cloud)
pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";

/// Default per-request timeout for ARM calls (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Suffix appended to the managed application id to form the data source id
pub const AGENT_HELM_CONFIG_ID_SUFFIX: &str = "agent-helm-config";

/// User-Agent sent on every ARM request
pub const USER_AGENT: &str = concat!("hcs-agent-helm-config/", env!("CARGO_PKG_VERSION"));

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "hcs_agent_helm_config=info";

/// Environment variables read by [`crate::config::ProviderConfig::from_env`]
pub mod env {
    pub const SUBSCRIPTION_ID: &str = "ARM_SUBSCRIPTION_ID";
    pub const ENDPOINT: &str = "ARM_ENDPOINT";
    pub const CLIENT_ID: &str = "ARM_CLIENT_ID";
    pub const ACCESS_TOKEN: &str = "ARM_ACCESS_TOKEN";
    pub const REQUEST_TIMEOUT_SECS: &str = "HCS_REQUEST_TIMEOUT_SECS";
}
