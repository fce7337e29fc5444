//! Guest-facing hotel views derived from settings.
//!
//! Each view is always complete: missing settings fall back to built-in
//! defaults, so these endpoints never fail.

use axum::{extract::State, Json};
use domain::models::{BusinessConfig, ContactDisplay, HotelInfo};

use crate::app::AppState;

/// `GET /api/v1/hotel/info`
pub async fn get_hotel_info(State(state): State<AppState>) -> Json<HotelInfo> {
    Json(state.settings.get_hotel_info().await)
}

/// `GET /api/v1/hotel/business`
pub async fn get_business_config(State(state): State<AppState>) -> Json<BusinessConfig> {
    Json(state.settings.get_business_config().await)
}

/// `GET /api/v1/hotel/contact`
pub async fn get_contact_display(State(state): State<AppState>) -> Json<ContactDisplay> {
    Json(state.settings.get_contact_display().await)
}
