//! # Provider Configuration
//!
//! Azure connection settings loaded from environment variables.
//!
//! Only the subscription id is required; everything else has a default.

mod provider;

pub use provider::{AzureAuthConfig, ConfigError, ProviderConfig};
