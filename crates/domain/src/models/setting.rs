//! System setting domain models.
//!
//! A setting is a named, typed, categorized configuration value. Values are
//! always persisted as text; the declared [`SettingType`] decides how the text
//! is coerced when it is read back.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category used when a write does not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Declared type of a setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    #[default]
    Text,
    Boolean,
    Number,
    Json,
}

impl SettingType {
    /// Tag stored in the `setting_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::Text => "text",
            SettingType::Boolean => "boolean",
            SettingType::Number => "number",
            SettingType::Json => "json",
        }
    }

    /// Parses a stored tag. Unrecognized tags read as `Text`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "boolean" => SettingType::Boolean,
            "number" => SettingType::Number,
            "json" => SettingType::Json,
            _ => SettingType::Text,
        }
    }

    /// Coerces a raw stored string according to this type.
    pub fn cast(&self, raw: &str) -> SettingValue {
        match self {
            SettingType::Boolean => SettingValue::Boolean(is_truthy(raw)),
            SettingType::Number => {
                if is_numeric(raw) {
                    match raw.trim().parse::<f64>() {
                        Ok(n) => SettingValue::Number(n),
                        Err(_) => SettingValue::Text(raw.to_string()),
                    }
                } else {
                    SettingValue::Text(raw.to_string())
                }
            }
            SettingType::Json => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(value) => SettingValue::Json(value),
                Err(_) => SettingValue::Null,
            },
            SettingType::Text => SettingValue::Text(raw.to_string()),
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Truthiness of a stored string.
///
/// Empty, `0`, `false`, `no` and `off` are false; everything else is true.
pub fn is_truthy(raw: &str) -> bool {
    let trimmed = raw.trim();
    !(trimmed.is_empty()
        || trimmed == "0"
        || trimmed.eq_ignore_ascii_case("false")
        || trimmed.eq_ignore_ascii_case("no")
        || trimmed.eq_ignore_ascii_case("off"))
}

/// Returns true for decimal numeric strings: optional sign, digits with an
/// optional fraction, optional exponent. Surrounding whitespace is allowed;
/// `inf`/`nan` spellings are not numeric.
pub fn is_numeric(raw: &str) -> bool {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits + frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// A coerced setting value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    Json(serde_json::Value),
}

impl SettingValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            SettingValue::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            SettingValue::Json(serde_json::Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view. Numeric text (a `number` setting holding e.g. `" 16 "`)
    /// also converts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            SettingValue::Text(s) if is_numeric(s) => s.trim().parse().ok(),
            SettingValue::Json(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            SettingValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the value as display text; `None` for `Null`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            SettingValue::Null => None,
            SettingValue::Boolean(b) => Some(b.to_string()),
            SettingValue::Number(n) => Some(n.to_string()),
            SettingValue::Text(s) => Some(s.clone()),
            SettingValue::Json(serde_json::Value::String(s)) => Some(s.clone()),
            SettingValue::Json(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Boolean(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        SettingValue::Json(value)
    }
}

/// A persisted setting row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Setting {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    pub category: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    /// The stored value coerced by its declared type.
    pub fn coerced(&self) -> SettingValue {
        self.setting_type.cast(&self.value)
    }

    /// Coerced value with metadata, as used by category listings.
    pub fn entry(&self) -> SettingEntry {
        SettingEntry {
            value: self.coerced(),
            setting_type: self.setting_type,
            description: self.description.clone(),
            is_public: self.is_public,
        }
    }
}

/// Coerced value plus metadata for category and grouped listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingEntry {
    pub value: SettingValue,
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    pub description: Option<String>,
    pub is_public: bool,
}

/// Settings of one category keyed by setting key.
pub type CategorySettings = BTreeMap<String, SettingEntry>;

/// All settings grouped by category, then key.
pub type GroupedSettings = BTreeMap<String, CategorySettings>;

/// A write through [`crate::services::SettingsStore::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSetting {
    pub key: String,
    pub value: String,
    pub setting_type: SettingType,
    pub category: String,
    pub description: String,
    pub is_public: bool,
}

impl NewSetting {
    /// A private `text` setting in the `general` category.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            setting_type: SettingType::Text,
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
            is_public: false,
        }
    }

    pub fn with_type(mut self, setting_type: SettingType) -> Self {
        self.setting_type = setting_type;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Converts a JSON request value into the raw text that gets stored.
///
/// Strings are stored verbatim, everything else as its JSON text.
pub fn raw_value_from_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Request to create or replace a setting.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertSettingRequest {
    pub value: serde_json::Value,
    #[serde(default, rename = "type")]
    pub setting_type: Option<SettingType>,
    #[validate(custom(function = "shared::validation::validate_category"))]
    pub category: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl UpsertSettingRequest {
    /// Builds the store write for `key`, applying the write defaults.
    pub fn into_new_setting(self, key: &str) -> NewSetting {
        let mut setting = NewSetting::new(key, raw_value_from_json(&self.value))
            .with_type(self.setting_type.unwrap_or_default());
        if let Some(category) = self.category {
            setting = setting.in_category(category);
        }
        if let Some(description) = self.description {
            setting = setting.with_description(description);
        }
        setting.public(self.is_public.unwrap_or(false))
    }
}

/// Request to update the values of several existing settings at once.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkUpdateSettingsRequest {
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl BulkUpdateSettingsRequest {
    /// Raw values keyed by setting key.
    pub fn raw_values(&self) -> BTreeMap<String, String> {
        self.settings
            .iter()
            .map(|(key, value)| (key.clone(), raw_value_from_json(value)))
            .collect()
    }
}

/// Single setting with both its stored and coerced value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingDetailResponse {
    pub key: String,
    pub raw_value: String,
    pub value: SettingValue,
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    pub category: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<Setting> for SettingDetailResponse {
    fn from(setting: Setting) -> Self {
        let value = setting.coerced();
        Self {
            key: setting.key,
            raw_value: setting.value,
            value,
            setting_type: setting.setting_type,
            category: setting.category,
            description: setting.description,
            is_public: setting.is_public,
            updated_at: setting.updated_at,
        }
    }
}

/// Response after a bulk update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkUpdateSettingsResponse {
    pub success: bool,
    /// Keys whose value was written.
    pub updated: Vec<String>,
    /// Requested keys with no stored setting; nothing was written for them.
    pub skipped: Vec<String>,
}

impl BulkUpdateSettingsResponse {
    /// Splits the requested keys into updated and skipped.
    pub fn from_outcome<'a>(
        requested: impl IntoIterator<Item = &'a String>,
        updated: Vec<String>,
    ) -> Self {
        let skipped = requested
            .into_iter()
            .filter(|key| !updated.contains(key))
            .cloned()
            .collect();
        Self {
            success: true,
            updated,
            skipped,
        }
    }
}
