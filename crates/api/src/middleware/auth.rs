//! Admin authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::{ApiKeyAuth, API_KEY_HEADER};

/// Requires a valid API key with admin privileges in `X-API-Key`.
///
/// The authenticated key is stored in request extensions for handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let api_key = match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) => key.to_string(),
        None => {
            return ApiError::Unauthorized("Invalid or missing API key".to_string())
                .into_response()
        }
    };

    match ApiKeyAuth::validate(&state.pool, &api_key).await {
        Ok(auth) if auth.is_admin => {
            tracing::debug!(key_prefix = %auth.key_prefix, "Admin request authenticated");
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Ok(auth) => {
            tracing::warn!(key_prefix = %auth.key_prefix, "Non-admin key used on admin route");
            ApiError::Forbidden("Admin access required".to_string()).into_response()
        }
        Err(err) => err.into_response(),
    }
}
