//! ARM error response formatting
//!
//! Format: `{"error": {"code": "ResourceNotFound", "message": "..."}}`
//! Reference: https://learn.microsoft.com/en-us/azure/azure-resource-manager/troubleshooting/common-deployment-errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// ARM error codes used by the mock
pub mod arm_error_codes {
    pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
    pub const RESOURCE_GROUP_NOT_FOUND: &str = "ResourceGroupNotFound";
    pub const AUTHENTICATION_FAILED: &str = "AuthenticationFailed";
    pub const AUTHORIZATION_FAILED: &str = "AuthorizationFailed";
    pub const INVALID_API_VERSION: &str = "InvalidApiVersionParameter";
    pub const TOO_MANY_REQUESTS: &str = "TooManyRequests";
    pub const INTERNAL_SERVER_ERROR: &str = "InternalServerError";
}

/// ARM error response
pub fn arm_error_response(status: StatusCode, code: &str, message: String) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        })),
    )
        .into_response()
}

/// Map HTTP status code to an ARM error code
pub fn arm_error_code_from_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => arm_error_codes::RESOURCE_NOT_FOUND,
        StatusCode::UNAUTHORIZED => arm_error_codes::AUTHENTICATION_FAILED,
        StatusCode::FORBIDDEN => arm_error_codes::AUTHORIZATION_FAILED,
        StatusCode::TOO_MANY_REQUESTS => arm_error_codes::TOO_MANY_REQUESTS,
        _ => arm_error_codes::INTERNAL_SERVER_ERROR,
    }
}
