//! Row mapping for keys that unlock the admin settings routes.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored API key. The raw key is never persisted; only its SHA-256 hash
/// and the short `hs_` display prefix shown in logs.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyEntity {
    pub id: i64,
    /// Hex SHA-256 of the full key; the lookup column.
    pub key_hash: String,
    pub key_prefix: String,
    /// Who the key was issued to, e.g. "Front desk tablet".
    pub name: String,
    /// Revoked keys stay in the table with `is_active = false`.
    pub is_active: bool,
    /// Required for every `/api/v1/admin/settings` route.
    pub is_admin: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// `None` means the key never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeyEntity {
    /// True once `at` is past the expiry; keys without an expiry never expire.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < at)
    }
}
