//! Derived hotel views built from category listings.
//!
//! Every field falls back to a literal default when its key is absent from
//! the store (or holds no usable value), so the views are always complete.

use serde::Serialize;

use super::setting::{CategorySettings, SettingValue};

/// Category holding hotel identity settings.
pub const HOTEL_CATEGORY: &str = "hotel";

/// Category holding operational business settings.
pub const BUSINESS_CATEGORY: &str = "business";

/// Category holding system toggles.
pub const SYSTEM_CATEGORY: &str = "system";

pub const DEFAULT_HOTEL_NAME: &str = "Orlando International Resorts";
pub const DEFAULT_HOTEL_ADDRESS: &str = "Thika Road, Roysambu";
pub const DEFAULT_HOTEL_PHONE: &str = "+254 742 824 006";
pub const DEFAULT_HOTEL_EMAIL: &str = "info@orlandoresorts.co.ke";
pub const DEFAULT_HOTEL_WEBSITE: &str = "https://www.orlandoresorts.co.ke";
pub const DEFAULT_HOTEL_DESCRIPTION: &str =
    "Comfortable rooms, conference facilities and dining on the outskirts of Nairobi.";
pub const DEFAULT_HOTEL_CITY: &str = "Nairobi";
pub const DEFAULT_HOTEL_STATE: &str = "Nairobi County";
pub const DEFAULT_HOTEL_COUNTRY: &str = "Kenya";
pub const DEFAULT_HOTEL_POSTAL_CODE: &str = "00100";
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+254742824006";
pub const DEFAULT_FACEBOOK: &str = "orlandoresorts";
pub const DEFAULT_INSTAGRAM: &str = "orlandoresorts";
pub const DEFAULT_TWITTER: &str = "orlandoresorts";

pub const DEFAULT_CHECK_IN_TIME: &str = "14:00";
pub const DEFAULT_CHECK_OUT_TIME: &str = "10:00";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "KSh";
pub const DEFAULT_CURRENCY_CODE: &str = "KES";
pub const DEFAULT_TAX_RATE: f64 = 16.0;
pub const DEFAULT_SERVICE_CHARGE: f64 = 10.0;
pub const DEFAULT_CANCELLATION_POLICY: &str =
    "Free cancellation up to 24 hours before check-in. Later cancellations are charged one night.";
pub const DEFAULT_PAYMENT_METHODS: [&str; 3] = ["M-Pesa", "Cash", "Card"];

/// Hotel identity as shown on guest-facing pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HotelInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub whatsapp_number: String,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

impl HotelInfo {
    /// Builds the view from the `hotel` category listing.
    pub fn from_settings(settings: &CategorySettings) -> Self {
        Self {
            name: text_or(settings, "hotel_name", DEFAULT_HOTEL_NAME),
            address: text_or(settings, "hotel_address", DEFAULT_HOTEL_ADDRESS),
            phone: text_or(settings, "hotel_phone", DEFAULT_HOTEL_PHONE),
            email: text_or(settings, "hotel_email", DEFAULT_HOTEL_EMAIL),
            website: text_or(settings, "hotel_website", DEFAULT_HOTEL_WEBSITE),
            description: text_or(settings, "hotel_description", DEFAULT_HOTEL_DESCRIPTION),
            city: text_or(settings, "hotel_city", DEFAULT_HOTEL_CITY),
            state: text_or(settings, "hotel_state", DEFAULT_HOTEL_STATE),
            country: text_or(settings, "hotel_country", DEFAULT_HOTEL_COUNTRY),
            postal_code: text_or(settings, "hotel_postal_code", DEFAULT_HOTEL_POSTAL_CODE),
            whatsapp_number: text_or(settings, "whatsapp_number", DEFAULT_WHATSAPP_NUMBER),
            facebook: text_or(settings, "social_facebook", DEFAULT_FACEBOOK),
            instagram: text_or(settings, "social_instagram", DEFAULT_INSTAGRAM),
            twitter: text_or(settings, "social_twitter", DEFAULT_TWITTER),
        }
    }
}

impl Default for HotelInfo {
    fn default() -> Self {
        Self::from_settings(&CategorySettings::new())
    }
}

/// Operational configuration used by booking and billing pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BusinessConfig {
    pub check_in_time: String,
    pub check_out_time: String,
    pub currency_symbol: String,
    pub currency_code: String,
    pub tax_rate: f64,
    pub service_charge: f64,
    pub cancellation_policy: String,
    pub payment_methods: Vec<String>,
}

impl BusinessConfig {
    /// Builds the view from the `business` category listing.
    pub fn from_settings(settings: &CategorySettings) -> Self {
        Self {
            check_in_time: text_or(settings, "check_in_time", DEFAULT_CHECK_IN_TIME),
            check_out_time: text_or(settings, "check_out_time", DEFAULT_CHECK_OUT_TIME),
            currency_symbol: text_or(settings, "currency_symbol", DEFAULT_CURRENCY_SYMBOL),
            currency_code: text_or(settings, "currency_code", DEFAULT_CURRENCY_CODE),
            tax_rate: number_or(settings, "tax_rate", DEFAULT_TAX_RATE),
            service_charge: number_or(settings, "service_charge", DEFAULT_SERVICE_CHARGE),
            cancellation_policy: text_or(
                settings,
                "cancellation_policy",
                DEFAULT_CANCELLATION_POLICY,
            ),
            payment_methods: list_or(settings, "payment_methods", &DEFAULT_PAYMENT_METHODS),
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::from_settings(&CategorySettings::new())
    }
}

/// Ready-to-render contact links derived from [`HotelInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactDisplay {
    pub phone: String,
    pub phone_link: String,
    pub email: String,
    pub email_link: String,
    pub whatsapp: String,
    pub whatsapp_link: String,
    pub website: String,
    pub full_address: String,
}

impl ContactDisplay {
    /// Pure string transformation of the hotel info; no store access.
    pub fn from_hotel_info(info: &HotelInfo) -> Self {
        let phone_compact: String = info.phone.chars().filter(|c| !c.is_whitespace()).collect();
        let whatsapp_digits: String = info
            .whatsapp_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let full_address = [
            info.address.as_str(),
            info.city.as_str(),
            info.state.as_str(),
            info.postal_code.as_str(),
            info.country.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            phone: info.phone.clone(),
            phone_link: format!("tel:{}", phone_compact),
            email: info.email.clone(),
            email_link: format!("mailto:{}", info.email.trim()),
            whatsapp: info.whatsapp_number.clone(),
            whatsapp_link: format!("https://wa.me/{}", whatsapp_digits),
            website: info.website.clone(),
            full_address,
        }
    }
}

impl From<&HotelInfo> for ContactDisplay {
    fn from(info: &HotelInfo) -> Self {
        Self::from_hotel_info(info)
    }
}

fn text_or(settings: &CategorySettings, key: &str, default: &str) -> String {
    settings
        .get(key)
        .and_then(|entry| entry.value.to_text())
        .unwrap_or_else(|| default.to_string())
}

fn number_or(settings: &CategorySettings, key: &str, default: f64) -> f64 {
    settings
        .get(key)
        .and_then(|entry| entry.value.as_f64())
        .unwrap_or(default)
}

/// Reads a list stored either as a JSON array or as comma-separated text.
fn list_or(settings: &CategorySettings, key: &str, default: &[&str]) -> Vec<String> {
    let parsed = settings.get(key).and_then(|entry| match &entry.value {
        SettingValue::Json(serde_json::Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect::<Vec<_>>(),
        ),
        SettingValue::Text(text) => Some(
            text.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>(),
        ),
        _ => None,
    });

    parsed.unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
}
