//! Shared Azure Resource Manager path definitions
//!
//! This crate centralizes all ARM API paths to ensure consistency
//! between the data source client and the mock server implementation.
//!
//! ## Path builders
//!
//! The functions in [`azure`] build request paths (without the endpoint host)
//! from resource coordinates. Each coordinate is percent-encoded as one path
//! segment.
//!
//! ## Route Constants
//!
//! Route constants are provided for Axum routes, which require static string literals.
//! These constants are validated against the path builder output in tests.

pub mod azure;

pub use azure::{
    custom_provider_config_path, encode_segment, managed_application_path, managed_cluster_path,
    ApiVersion,
};
