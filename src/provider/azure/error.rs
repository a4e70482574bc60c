//! # ARM Error Types
//!
//! Errors returned by the Azure Resource Manager client. `NotFound` is kept
//! apart from every other failure so callers can report a missing resource
//! differently from a broken call.

use std::time::Duration;
use thiserror::Error;

/// Error returned by an ARM request
#[derive(Debug, Error)]
pub enum ArmError {
    /// The resource does not exist (HTTP 404)
    #[error("{operation}: resource not found at {path}")]
    NotFound {
        operation: &'static str,
        path: String,
    },
    /// Any other non-success HTTP status
    #[error("{operation}: HTTP {status}{}: {message}", code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Status {
        operation: &'static str,
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The request could not be sent or the response could not be read
    #[error("{operation}: request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The request did not complete within the configured timeout
    #[error("{operation}: request timed out after {}s", timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
    /// The response body was not the expected ARM resource shape
    #[error("{operation}: unexpected response body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// No access token could be obtained for the ARM scope
    #[error("failed to acquire ARM access token: {0}")]
    Credential(#[source] azure_core::Error),
}

impl ArmError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArmError::NotFound { .. })
    }

    /// Short outcome label used for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ArmError::NotFound { .. } => "not_found",
            ArmError::Status { .. } => "http_error",
            ArmError::Request { .. } => "request_error",
            ArmError::Timeout { .. } => "timeout",
            ArmError::Decode { .. } => "decode_error",
            ArmError::Credential(_) => "credential_error",
        }
    }
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ArmErrorResponse {
    pub error: ArmErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ArmErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Build an [`ArmError::Status`] from a non-success response body
///
/// Falls back to the raw body when it is not an ARM error envelope.
pub(crate) fn status_error(operation: &'static str, status: u16, body: &str) -> ArmError {
    match serde_json::from_str::<ArmErrorResponse>(body) {
        Ok(envelope) => ArmError::Status {
            operation,
            status,
            code: envelope.error.code,
            message: envelope
                .error
                .message
                .unwrap_or_else(|| body.trim().to_string()),
        },
        Err(_) => ArmError::Status {
            operation,
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}
