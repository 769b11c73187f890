//! Middleware: authenticated-user extraction
//!
//! Session issuance and verification live outside this service; requests
//! arrive carrying an opaque authenticated user id as the bearer token. This
//! layer parses it and hands handlers a typed [`UserId`] via extensions.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use cityswap_api::ApiError;
use cityswap_core::UserId;

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Authentication middleware
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).ok_or_else(|| ApiError::Unauthorized {
        message: Some("Missing authorization header".to_string()),
    })?;

    let user_id: UserId = token.parse().map_err(|_| ApiError::Unauthorized {
        message: Some("Invalid authenticated user id".to_string()),
    })?;

    // Insert user ID into request extensions for handlers to use
    request.extensions_mut().insert(user_id);

    Ok(next.run(request).await)
}
