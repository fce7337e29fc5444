//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a setting key (matches the column definition used by migrations).
pub const MAX_SETTING_KEY_LENGTH: usize = 100;

/// Maximum length of a category label.
pub const MAX_CATEGORY_LENGTH: usize = 50;

lazy_static::lazy_static! {
    /// Setting keys are snake_case identifiers starting with a letter.
    pub static ref SETTING_KEY_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

/// Validates a setting key: snake_case, starts with a letter, at most 100 characters.
pub fn validate_setting_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() || key.len() > MAX_SETTING_KEY_LENGTH {
        let mut err = ValidationError::new("setting_key_length");
        err.message = Some("Setting key must be between 1 and 100 characters".into());
        return Err(err);
    }

    if !SETTING_KEY_REGEX.is_match(key) {
        let mut err = ValidationError::new("setting_key_format");
        err.message = Some(
            "Setting key must start with a lowercase letter and contain only lowercase letters, digits, and underscores"
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates a category label: same alphabet as keys, at most 50 characters.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.is_empty() || category.len() > MAX_CATEGORY_LENGTH {
        let mut err = ValidationError::new("category_length");
        err.message = Some("Category must be between 1 and 50 characters".into());
        return Err(err);
    }

    if !SETTING_KEY_REGEX.is_match(category) {
        let mut err = ValidationError::new("category_format");
        err.message = Some(
            "Category must start with a lowercase letter and contain only lowercase letters, digits, and underscores"
                .into(),
        );
        return Err(err);
    }

    Ok(())
}
