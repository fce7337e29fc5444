//! Settings store: typed configuration access over a pluggable backend.
//!
//! The store owns a read cache for single-key lookups. Writes invalidate the
//! affected cache entries before returning, so a `get` that follows a
//! successful `set` in the same process never sees the old value. Category,
//! grouped and public listings always read from the backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::cache::SettingsCache;
use crate::models::hotel::{BUSINESS_CATEGORY, HOTEL_CATEGORY};
use crate::models::{
    default_settings, BusinessConfig, CategorySettings, ContactDisplay, GroupedSettings,
    HotelInfo, NewSetting, Setting, SettingValue,
};

/// Errors raised by the settings store and its backends.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Persistent storage for settings rows.
///
/// Values cross this boundary as raw text; coercion happens in the store.
#[async_trait::async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Point lookup by key.
    async fn find(&self, key: &str) -> Result<Option<Setting>, SettingsError>;

    /// Insert, or update value/type/category/description on key conflict.
    async fn upsert(&self, setting: &NewSetting) -> Result<(), SettingsError>;

    /// Insert only when the key is absent. Returns whether a row was written.
    async fn insert_if_absent(&self, setting: &NewSetting) -> Result<bool, SettingsError>;

    /// Rows of one category ordered by key.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Setting>, SettingsError>;

    /// All rows ordered by category, then key.
    async fn list_all(&self) -> Result<Vec<Setting>, SettingsError>;

    /// Rows flagged public, ordered by key.
    async fn list_public(&self) -> Result<Vec<Setting>, SettingsError>;

    /// Removes a row. Returns whether a row existed.
    async fn delete(&self, key: &str) -> Result<bool, SettingsError>;

    async fn exists(&self, key: &str) -> Result<bool, SettingsError>;

    /// Updates value and `updated_at` of each key in one transaction.
    /// Either every update applies or none does. Keys without a row are
    /// skipped. Returns the keys that were updated, in key order.
    async fn update_values(
        &self,
        updates: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, SettingsError>;
}

/// Typed settings access with a per-instance read cache.
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    cache: SettingsCache,
}

impl SettingsStore {
    /// Creates a store over `backend`. Performs no I/O.
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            cache: SettingsCache::new(),
        }
    }

    /// Returns the coerced value of `key`, or `default` when the key does not
    /// exist or the backend cannot be reached.
    pub async fn get(&self, key: &str, default: SettingValue) -> SettingValue {
        match self.try_get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read setting, using default");
                default
            }
        }
    }

    /// Like [`Self::get`] but distinguishes a missing key from a storage failure.
    pub async fn try_get(&self, key: &str) -> Result<Option<SettingValue>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            counter!("settings_cache_hits_total").increment(1);
            return Ok(Some(value));
        }
        counter!("settings_cache_misses_total").increment(1);
        debug!(key = %key, "Setting cache miss");

        let generation = self.cache.generation();
        let Some(setting) = self.backend.find(key).await? else {
            return Ok(None);
        };

        let value = setting.coerced();
        if !self.cache.insert_if_unchanged(key, value.clone(), generation) {
            debug!(key = %key, "Setting changed during load, not cached");
        }
        Ok(Some(value))
    }

    /// Reads the full row for `key`, bypassing the cache.
    pub async fn describe(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        self.backend.find(key).await
    }

    /// Creates or replaces a setting.
    ///
    /// On an existing key the value, type, category and description are
    /// replaced; visibility is kept as first written.
    pub async fn set(&self, setting: NewSetting) -> Result<(), SettingsError> {
        validate_key(&setting.key)?;
        shared::validation::validate_category(&setting.category)
            .map_err(|e| SettingsError::Validation(validation_message(&e)))?;

        self.cache.invalidate(&setting.key);
        let result = self.backend.upsert(&setting).await;
        // Bumps the generation so readers that loaded the old row do not cache it.
        self.cache.invalidate(&setting.key);

        match &result {
            Ok(()) => info!(
                key = %setting.key,
                setting_type = %setting.setting_type,
                category = %setting.category,
                "Setting saved"
            ),
            Err(e) => warn!(key = %setting.key, error = %e, "Failed to save setting"),
        }
        result
    }

    /// Settings of `category` keyed by key; empty on storage failure.
    pub async fn get_by_category(&self, category: &str) -> CategorySettings {
        self.try_get_by_category(category)
            .await
            .unwrap_or_else(|e| {
                warn!(category = %category, error = %e, "Failed to read settings category");
                CategorySettings::new()
            })
    }

    pub async fn try_get_by_category(
        &self,
        category: &str,
    ) -> Result<CategorySettings, SettingsError> {
        let rows = self.backend.list_by_category(category).await?;
        Ok(rows
            .iter()
            .filter(|row| row.category == category)
            .map(|row| (row.key.clone(), row.entry()))
            .collect())
    }

    /// Every setting grouped by category; empty on storage failure.
    pub async fn get_all_grouped(&self) -> GroupedSettings {
        self.try_get_all_grouped().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read settings");
            GroupedSettings::new()
        })
    }

    pub async fn try_get_all_grouped(&self) -> Result<GroupedSettings, SettingsError> {
        let rows = self.backend.list_all().await?;
        let mut grouped = GroupedSettings::new();
        for row in &rows {
            grouped
                .entry(row.category.clone())
                .or_default()
                .insert(row.key.clone(), row.entry());
        }
        Ok(grouped)
    }

    /// Updates several existing settings as one all-or-nothing unit.
    ///
    /// Only values change; type, category and visibility stay as stored.
    /// Returns the keys that were updated; keys without a row are skipped.
    pub async fn update_multiple(
        &self,
        updates: BTreeMap<String, String>,
    ) -> Result<Vec<String>, SettingsError> {
        if updates.is_empty() {
            return Ok(Vec::new());
        }
        for key in updates.keys() {
            validate_key(key)?;
        }

        let keys = || updates.keys().map(String::as_str);
        self.cache.invalidate_many(keys());
        let result = self.backend.update_values(&updates).await;
        self.cache.invalidate_many(keys());

        match result {
            Ok(updated) => {
                info!(
                    requested = updates.len(),
                    updated = updated.len(),
                    "Bulk settings update committed"
                );
                Ok(updated)
            }
            Err(e) => {
                warn!(
                    requested = updates.len(),
                    error = %e,
                    "Bulk settings update rolled back"
                );
                Err(e)
            }
        }
    }

    /// Removes a setting. Returns whether it existed.
    pub async fn delete(&self, key: &str) -> Result<bool, SettingsError> {
        self.cache.invalidate(key);
        let deleted = self.backend.delete(key).await;
        self.cache.invalidate(key);

        if let Ok(true) = deleted {
            info!(key = %key, "Setting deleted");
        }
        deleted
    }

    /// Existence check against the backend; the cache is not consulted.
    /// Storage failures read as `false`.
    pub async fn exists(&self, key: &str) -> bool {
        self.backend.exists(key).await.unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "Failed to check setting existence");
            false
        })
    }

    /// Public settings as flat coerced values; empty on storage failure.
    pub async fn get_public_settings(&self) -> BTreeMap<String, SettingValue> {
        self.try_get_public_settings().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read public settings");
            BTreeMap::new()
        })
    }

    pub async fn try_get_public_settings(
        &self,
    ) -> Result<BTreeMap<String, SettingValue>, SettingsError> {
        let rows = self.backend.list_public().await?;
        Ok(rows
            .iter()
            .filter(|row| row.is_public)
            .map(|row| (row.key.clone(), row.coerced()))
            .collect())
    }

    pub async fn get_hotel_info(&self) -> HotelInfo {
        HotelInfo::from_settings(&self.get_by_category(HOTEL_CATEGORY).await)
    }

    pub async fn get_business_config(&self) -> BusinessConfig {
        BusinessConfig::from_settings(&self.get_by_category(BUSINESS_CATEGORY).await)
    }

    pub async fn get_contact_display(&self) -> ContactDisplay {
        ContactDisplay::from_hotel_info(&self.get_hotel_info().await)
    }

    /// Seeds the default catalogue, leaving existing rows untouched.
    /// Returns the number of settings inserted.
    pub async fn initialize_defaults(&self) -> Result<usize, SettingsError> {
        let mut inserted = 0;
        for setting in default_settings() {
            if self.backend.insert_if_absent(&setting).await? {
                self.cache.invalidate(&setting.key);
                inserted += 1;
            }
        }
        info!(inserted = inserted, "Default settings initialized");
        Ok(inserted)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

fn validate_key(key: &str) -> Result<(), SettingsError> {
    shared::validation::validate_setting_key(key)
        .map_err(|e| SettingsError::Validation(validation_message(&e)))
}

fn validation_message(err: &validator::ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}
