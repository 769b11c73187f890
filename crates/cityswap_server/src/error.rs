//! Server error types

use axum::response::{IntoResponse, Response};
use cityswap_api::ApiError;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Core error: {0}")]
    Core(#[from] cityswap_core::CoreError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Convert to ApiError for consistent error responses
        let api_error = match self {
            ServerError::Core(e) => ApiError::from(e),
            ServerError::Api(e) => e,
            ServerError::AddrParse(e) => ApiError::Internal {
                message: e.to_string(),
            },
            ServerError::Io(e) => ApiError::Internal {
                message: e.to_string(),
            },
        };

        api_error.into_response()
    }
}
