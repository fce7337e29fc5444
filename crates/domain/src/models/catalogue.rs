//! Default settings catalogue seeded on first start.

use super::hotel::{
    BUSINESS_CATEGORY, DEFAULT_CANCELLATION_POLICY, DEFAULT_CHECK_IN_TIME,
    DEFAULT_CHECK_OUT_TIME, DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL, DEFAULT_FACEBOOK,
    DEFAULT_HOTEL_ADDRESS, DEFAULT_HOTEL_CITY, DEFAULT_HOTEL_COUNTRY, DEFAULT_HOTEL_DESCRIPTION,
    DEFAULT_HOTEL_EMAIL, DEFAULT_HOTEL_NAME, DEFAULT_HOTEL_PHONE, DEFAULT_HOTEL_POSTAL_CODE,
    DEFAULT_HOTEL_STATE, DEFAULT_HOTEL_WEBSITE, DEFAULT_INSTAGRAM, DEFAULT_PAYMENT_METHODS,
    DEFAULT_SERVICE_CHARGE, DEFAULT_TAX_RATE, DEFAULT_TWITTER, DEFAULT_WHATSAPP_NUMBER,
    HOTEL_CATEGORY, SYSTEM_CATEGORY,
};
use super::setting::{NewSetting, SettingType};

fn hotel(key: &str, value: &str, description: &str) -> NewSetting {
    NewSetting::new(key, value)
        .in_category(HOTEL_CATEGORY)
        .with_description(description)
        .public(true)
}

fn business(key: &str, value: String, setting_type: SettingType, description: &str) -> NewSetting {
    NewSetting::new(key, value)
        .with_type(setting_type)
        .in_category(BUSINESS_CATEGORY)
        .with_description(description)
        .public(true)
}

/// The settings a fresh installation starts with.
pub fn default_settings() -> Vec<NewSetting> {
    let payment_methods = serde_json::to_string(&DEFAULT_PAYMENT_METHODS)
        .unwrap_or_else(|_| "[]".to_string());

    vec![
        hotel("hotel_name", DEFAULT_HOTEL_NAME, "Hotel display name"),
        hotel("hotel_address", DEFAULT_HOTEL_ADDRESS, "Street address"),
        hotel("hotel_phone", DEFAULT_HOTEL_PHONE, "Front desk phone number"),
        hotel("hotel_email", DEFAULT_HOTEL_EMAIL, "Reservations email"),
        hotel("hotel_website", DEFAULT_HOTEL_WEBSITE, "Public website"),
        hotel("hotel_description", DEFAULT_HOTEL_DESCRIPTION, "Short description"),
        hotel("hotel_city", DEFAULT_HOTEL_CITY, "City"),
        hotel("hotel_state", DEFAULT_HOTEL_STATE, "State or county"),
        hotel("hotel_country", DEFAULT_HOTEL_COUNTRY, "Country"),
        hotel("hotel_postal_code", DEFAULT_HOTEL_POSTAL_CODE, "Postal code"),
        hotel("whatsapp_number", DEFAULT_WHATSAPP_NUMBER, "WhatsApp contact number"),
        hotel("social_facebook", DEFAULT_FACEBOOK, "Facebook handle"),
        hotel("social_instagram", DEFAULT_INSTAGRAM, "Instagram handle"),
        hotel("social_twitter", DEFAULT_TWITTER, "Twitter handle"),
        business(
            "check_in_time",
            DEFAULT_CHECK_IN_TIME.to_string(),
            SettingType::Text,
            "Standard check-in time",
        ),
        business(
            "check_out_time",
            DEFAULT_CHECK_OUT_TIME.to_string(),
            SettingType::Text,
            "Standard check-out time",
        ),
        business(
            "currency_symbol",
            DEFAULT_CURRENCY_SYMBOL.to_string(),
            SettingType::Text,
            "Currency symbol shown on prices",
        ),
        business(
            "currency_code",
            DEFAULT_CURRENCY_CODE.to_string(),
            SettingType::Text,
            "ISO 4217 currency code",
        ),
        business(
            "tax_rate",
            DEFAULT_TAX_RATE.to_string(),
            SettingType::Number,
            "VAT percentage",
        ),
        business(
            "service_charge",
            DEFAULT_SERVICE_CHARGE.to_string(),
            SettingType::Number,
            "Service charge percentage",
        ),
        business(
            "cancellation_policy",
            DEFAULT_CANCELLATION_POLICY.to_string(),
            SettingType::Text,
            "Cancellation policy shown at booking",
        ),
        business(
            "payment_methods",
            payment_methods,
            SettingType::Json,
            "Accepted payment methods",
        ),
        NewSetting::new("maintenance_mode", "0")
            .with_type(SettingType::Boolean)
            .in_category(SYSTEM_CATEGORY)
            .with_description("Show the maintenance page to guests")
            .public(true),
        NewSetting::new("online_booking_enabled", "1")
            .with_type(SettingType::Boolean)
            .in_category(SYSTEM_CATEGORY)
            .with_description("Accept bookings from the public site")
            .public(true),
        NewSetting::new("max_advance_booking_days", "365")
            .with_type(SettingType::Number)
            .in_category(SYSTEM_CATEGORY)
            .with_description("How far ahead guests may book"),
        NewSetting::new("mpesa_shortcode", "")
            .in_category(SYSTEM_CATEGORY)
            .with_description("M-Pesa paybill or till number"),
    ]
}
