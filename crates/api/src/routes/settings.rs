//! Public settings endpoint.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use domain::models::SettingValue;

use crate::app::AppState;

/// `GET /api/v1/settings/public`
///
/// Settings flagged public, as a flat key to coerced value map. Storage
/// failures yield an empty map rather than an error.
pub async fn get_public_settings(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, SettingValue>> {
    Json(state.settings.get_public_settings().await)
}
