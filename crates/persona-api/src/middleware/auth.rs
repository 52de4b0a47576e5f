use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Bearer-token middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and inserts the
/// token as the subject in an `AuthUser` request extension. Token
/// verification is done by the identity provider in front of this service.
pub async fn require_auth(mut req: Request, next: Next) -> Response {
    let sub = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(sub) = sub else {
        return ApiError::Unauthorized("missing or malformed bearer token".to_string())
            .into_response();
    };

    req.extensions_mut().insert(AuthUser { sub });
    next.run(req).await
}

/// Authenticated caller.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
}
