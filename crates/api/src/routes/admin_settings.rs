//! Admin settings management handlers.
//!
//! Mounted under `/api/v1/admin/settings` behind [`crate::middleware::require_admin`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use domain::models::{
    BulkUpdateSettingsRequest, BulkUpdateSettingsResponse, CategorySettings, GroupedSettings,
    SettingDetailResponse, UpsertSettingRequest,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Response after clearing the settings cache.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_settings).patch(bulk_update_settings))
        .route("/categories/:category", get(get_category))
        .route("/cache/clear", post(clear_cache))
        .route(
            "/:key",
            get(get_setting).put(upsert_setting).delete(delete_setting),
        )
}

/// GET /api/v1/admin/settings
///
/// Every setting grouped by category.
pub async fn list_settings(State(state): State<AppState>) -> Result<Json<GroupedSettings>, ApiError> {
    Ok(Json(state.settings.try_get_all_grouped().await?))
}

/// GET /api/v1/admin/settings/categories/:category
pub async fn get_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategorySettings>, ApiError> {
    Ok(Json(state.settings.try_get_by_category(&category).await?))
}

/// GET /api/v1/admin/settings/:key
///
/// Stored and coerced value with metadata; 404 when the key does not exist.
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SettingDetailResponse>, ApiError> {
    let setting = state
        .settings
        .describe(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Setting '{}' not found", key)))?;
    Ok(Json(setting.into()))
}

/// PUT /api/v1/admin/settings/:key
///
/// Creates or replaces a setting and returns the stored row.
pub async fn upsert_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<Json<SettingDetailResponse>, ApiError> {
    request.validate()?;

    let setting = request.into_new_setting(&key);
    let setting_type = setting.setting_type;
    state.settings.set(setting).await?;
    info!(key = %key, setting_type = %setting_type, "Setting updated via admin API");

    let stored = state
        .settings
        .describe(&key)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("Setting '{}' missing after write", key)))?;
    Ok(Json(stored.into()))
}

/// PATCH /api/v1/admin/settings
///
/// Updates the values of several existing settings in one transaction.
/// Keys that do not exist are skipped and reported under `skipped`.
pub async fn bulk_update_settings(
    State(state): State<AppState>,
    Json(request): Json<BulkUpdateSettingsRequest>,
) -> Result<Json<BulkUpdateSettingsResponse>, ApiError> {
    let updates = request.raw_values();
    let requested: Vec<String> = updates.keys().cloned().collect();

    let updated = state.settings.update_multiple(updates).await?;
    let response = BulkUpdateSettingsResponse::from_outcome(&requested, updated);
    info!(
        updated = response.updated.len(),
        skipped = response.skipped.len(),
        "Settings bulk-updated via admin API"
    );

    Ok(Json(response))
}

/// DELETE /api/v1/admin/settings/:key
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.settings.delete(&key).await? {
        info!(key = %key, "Setting deleted via admin API");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Setting '{}' not found", key)))
    }
}

/// POST /api/v1/admin/settings/cache/clear
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.settings.cached_len();
    state.settings.clear_cache();
    info!(cleared = cleared, "Settings cache cleared via admin API");
    Json(ClearCacheResponse { cleared })
}
