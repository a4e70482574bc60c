//! # Read Errors and Diagnostics
//!
//! Failure taxonomy of the agent Helm config read and its conversion to
//! user-facing diagnostics.

use crate::provider::ArmError;
use thiserror::Error;

/// Kind of upstream resource a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// The HCS managed application
    HcsCluster,
    /// The AKS managed cluster
    AksCluster,
}

/// Error returned by [`super::AgentHelmConfigDataSource::read`]
#[derive(Debug, Error)]
pub enum ReadError {
    /// An input attribute failed validation; no request was made
    #[error("invalid value for {attribute}: {message}")]
    InvalidInput {
        attribute: &'static str,
        message: String,
    },
    /// The managed application or the AKS cluster does not exist
    #[error("{}", not_found_message(*kind, name, resource_group))]
    NotFound {
        kind: ResourceKind,
        name: String,
        resource_group: String,
    },
    /// An upstream call failed for any other reason
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: ArmError,
    },
    /// An upstream payload did not have the expected shape
    #[error("{context}: {message}")]
    MalformedUpstreamData { context: String, message: String },
}

fn not_found_message(kind: ResourceKind, name: &str, resource_group: &str) -> String {
    match kind {
        ResourceKind::HcsCluster => format!(
            "no HCS Cluster found for (Managed Application {name:?}) (Resource Group {resource_group:?})."
        ),
        ResourceKind::AksCluster => format!(
            "no AKS Cluster found for (Cluster name {name:?}) (Resource Group {resource_group:?})."
        ),
    }
}

impl ReadError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ReadError::InvalidInput { .. } => "invalid_input",
            ReadError::NotFound { .. } => "not_found",
            ReadError::Transport { .. } => "transport",
            ReadError::MalformedUpstreamData { .. } => "malformed_upstream_data",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadError::NotFound { .. })
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("Error"),
        }
    }
}

/// User-facing diagnostic, shaped like a Terraform plugin diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute the diagnostic refers to, if any
    pub attribute: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(attribute) = &self.attribute {
            write!(f, "\n\n  with {attribute}")?;
        }
        write!(f, "\n\n{}", self.detail)
    }
}

impl From<&ReadError> for Diagnostic {
    fn from(error: &ReadError) -> Self {
        let (summary, attribute) = match error {
            ReadError::InvalidInput { attribute, .. } => {
                ("Invalid input", Some((*attribute).to_string()))
            }
            ReadError::NotFound { .. } => ("Resource not found", None),
            ReadError::Transport { .. } => ("Upstream request failed", None),
            ReadError::MalformedUpstreamData { .. } => ("Malformed upstream data", None),
        };
        Self {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: error.to_string(),
            attribute,
        }
    }
}

impl From<ReadError> for Diagnostic {
    fn from(error: ReadError) -> Self {
        Self::from(&error)
    }
}
