//! API error types

use miette::Diagnostic;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cityswap_core::CoreError;

/// API error response
#[derive(Debug, thiserror::Error, Diagnostic, Serialize, Deserialize, JsonSchema)]
pub enum ApiError {
    /// Request validation failed
    #[error("{message}")]
    #[diagnostic(
        code(api::validation_error),
        help("Correct the request body and retry")
    )]
    Validation { message: String },

    /// Authentication required
    #[error("Authentication required")]
    #[diagnostic(
        code(api::unauthorized),
        help("Provide an authenticated user id in the Authorization header")
    )]
    Unauthorized { message: Option<String> },

    /// Requester does not own the resource
    #[error("Unauthorized: you do not own this resource")]
    #[diagnostic(
        code(api::forbidden),
        help("Swap intents can only be read, matched, or cancelled by their owner")
    )]
    Forbidden { message: String },

    /// Resource not found
    #[error("{resource_type} not found")]
    #[diagnostic(
        code(api::not_found),
        help("The {resource_type} with ID '{resource_id}' does not exist; refetch before retrying")
    )]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// A precondition on the caller's profile is unmet
    #[error("{message}")]
    #[diagnostic(
        code(api::precondition_failed),
        help("Set a location on your profile first")
    )]
    Precondition { message: String },

    /// Storage or other unexpected failure; clients treat as transient
    #[error("Server error")]
    #[diagnostic(code(api::internal), help("Retry on the next poll tick"))]
    Internal { message: String },
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 400,
            ApiError::Unauthorized { .. } => 401,
            ApiError::Forbidden { .. } => 403,
            ApiError::NotFound { .. } => 404,
            // The reference surface reports unmet preconditions as a plain
            // bad request with an actionable message
            ApiError::Precondition { .. } => 400,
            ApiError::Internal { .. } => 500,
        }
    }

    /// Machine-readable error discriminator used in the response envelope
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::Forbidden { .. } => "forbidden",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Precondition { .. } => "precondition_failed",
            ApiError::Internal { .. } => "server_error",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: Some(message.into()),
        }
    }

    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SwapNotFound { id } => Self::not_found("swap intent", id.to_string()),
            CoreError::UserNotFound { id } => Self::not_found("user", id.to_string()),
            CoreError::NotSwapOwner { .. } => Self::Forbidden {
                message: err.to_string(),
            },
            CoreError::LocationRequired { .. } => Self::Precondition {
                message: err.to_string(),
            },
            CoreError::InvalidAmount { .. }
            | CoreError::InvalidCoordinates { .. }
            | CoreError::SamePairing { .. } => Self::Validation {
                message: err.to_string(),
            },
            CoreError::Store { .. } => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Uniform envelope: no error crosses the boundary as an unhandled fault
        let body = serde_json::json!({
            "success": false,
            "error": self.error_type(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
