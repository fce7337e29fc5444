//! API key authentication.

use sqlx::PgPool;

use crate::error::ApiError;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{extract_key_prefix, is_well_formed_api_key, sha256_hex};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Authenticated API key, stored in request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    pub api_key_id: i64,
    /// Display prefix, e.g. "hs_frontdes".
    pub key_prefix: String,
    pub is_admin: bool,
}

impl ApiKeyAuth {
    /// Validates a raw key against the stored hashes.
    ///
    /// Malformed keys are rejected before touching the database.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !is_well_formed_api_key(api_key) {
            return Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            ));
        }

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&sha256_hex(api_key))
            .await
            .map_err(|e| {
                tracing::error!(
                    key_prefix = extract_key_prefix(api_key).unwrap_or_default(),
                    "Database error during API key lookup: {}",
                    e
                );
                ApiError::ServiceUnavailable("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        if !ApiKeyRepository::is_key_valid(&key) {
            return Err(ApiError::Unauthorized(if key.is_active {
                "API key has expired".to_string()
            } else {
                "Invalid or missing API key".to_string()
            }));
        }

        let pool = pool.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(e) = ApiKeyRepository::new(pool).update_last_used(key_id).await {
                tracing::warn!("Failed to update API key last_used_at: {}", e);
            }
        });

        Ok(ApiKeyAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            is_admin: key.is_admin,
        })
    }
}
