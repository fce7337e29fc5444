//! In-memory settings backend.
//!
//! Used by tests and local runs without a database. Batch updates are
//! staged on a copy of the table and swapped in only when every update
//! succeeds, matching the all-or-nothing behaviour of the SQL backend.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use super::settings::{SettingsBackend, SettingsError};
use crate::models::{NewSetting, Setting};

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<String, Setting>,
    failing_keys: HashSet<String>,
    unavailable: bool,
}

impl State {
    fn check_available(&self) -> Result<(), SettingsError> {
        if self.unavailable {
            return Err(SettingsError::Storage("backend unavailable".to_string()));
        }
        Ok(())
    }

    fn check_writable(&self, key: &str) -> Result<(), SettingsError> {
        self.check_available()?;
        if self.failing_keys.contains(key) {
            tracing::warn!(key = %key, "In-memory backend simulating write failure");
            return Err(SettingsError::Storage(format!("write rejected for {}", key)));
        }
        Ok(())
    }
}

/// Settings table held in a mutex-guarded ordered map.
#[derive(Debug, Default)]
pub struct InMemorySettingsBackend {
    state: Mutex<State>,
}

impl InMemorySettingsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write touching `key` fail.
    pub fn fail_writes_for(&self, key: &str) {
        self.lock().failing_keys.insert(key.to_string());
    }

    /// Toggles simulated unavailability for all operations.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, key: &str) -> Option<Setting> {
        self.lock().rows.get(key).cloned()
    }

    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.lock().rows.get(key).map(|row| row.value.clone())
    }

    /// Overwrites a stored value directly, bypassing any store cache.
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Some(row) = self.lock().rows.get_mut(key) {
            row.value = value.to_string();
            row.updated_at = Utc::now();
        }
    }

    /// Removes a row directly, bypassing any store cache.
    pub fn remove_raw(&self, key: &str) {
        self.lock().rows.remove(key);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_row(setting: &NewSetting) -> Setting {
    Setting {
        key: setting.key.clone(),
        value: setting.value.clone(),
        setting_type: setting.setting_type,
        category: setting.category.clone(),
        description: Some(setting.description.clone()),
        is_public: setting.is_public,
        updated_at: Utc::now(),
    }
}

#[async_trait::async_trait]
impl SettingsBackend for InMemorySettingsBackend {
    async fn find(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        let state = self.lock();
        state.check_available()?;
        Ok(state.rows.get(key).cloned())
    }

    async fn upsert(&self, setting: &NewSetting) -> Result<(), SettingsError> {
        let mut state = self.lock();
        state.check_writable(&setting.key)?;

        match state.rows.get_mut(&setting.key) {
            Some(row) => {
                row.value = setting.value.clone();
                row.setting_type = setting.setting_type;
                row.category = setting.category.clone();
                row.description = Some(setting.description.clone());
                row.updated_at = Utc::now();
            }
            None => {
                state.rows.insert(setting.key.clone(), to_row(setting));
            }
        }
        Ok(())
    }

    async fn insert_if_absent(&self, setting: &NewSetting) -> Result<bool, SettingsError> {
        let mut state = self.lock();
        state.check_writable(&setting.key)?;

        if state.rows.contains_key(&setting.key) {
            return Ok(false);
        }
        state.rows.insert(setting.key.clone(), to_row(setting));
        Ok(true)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Setting>, SettingsError> {
        let state = self.lock();
        state.check_available()?;
        Ok(state
            .rows
            .values()
            .filter(|row| row.category == category)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Setting>, SettingsError> {
        let state = self.lock();
        state.check_available()?;
        let mut rows: Vec<Setting> = state.rows.values().cloned().collect();
        rows.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.key.cmp(&b.key)));
        Ok(rows)
    }

    async fn list_public(&self) -> Result<Vec<Setting>, SettingsError> {
        let state = self.lock();
        state.check_available()?;
        Ok(state
            .rows
            .values()
            .filter(|row| row.is_public)
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<bool, SettingsError> {
        let mut state = self.lock();
        state.check_writable(key)?;
        Ok(state.rows.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, SettingsError> {
        let state = self.lock();
        state.check_available()?;
        Ok(state.rows.contains_key(key))
    }

    async fn update_values(
        &self,
        updates: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, SettingsError> {
        let mut state = self.lock();
        state.check_available()?;

        let mut staged = state.rows.clone();
        let now = Utc::now();
        let mut updated = Vec::new();
        for (key, value) in updates {
            state.check_writable(key)?;
            if let Some(row) = staged.get_mut(key) {
                row.value = value.clone();
                row.updated_at = now;
                updated.push(key.clone());
            }
        }

        state.rows = staged;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SettingType;

    #[tokio::test]
    async fn test_upsert_and_find() {
        let backend = InMemorySettingsBackend::new();
        backend
            .upsert(&NewSetting::new("hotel_name", "Grand").public(true))
            .await
            .unwrap();

        let row = backend.find("hotel_name").await.unwrap().unwrap();
        assert_eq!(row.value, "Grand");
        assert_eq!(row.setting_type, SettingType::Text);
        assert!(row.is_public);
        assert!(backend.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let backend = InMemorySettingsBackend::new();
        assert!(backend.insert_if_absent(&NewSetting::new("a", "1")).await.unwrap());
        assert!(!backend.insert_if_absent(&NewSetting::new("a", "2")).await.unwrap());
        assert_eq!(backend.raw_value("a").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_update_values_skips_unknown_keys() {
        let backend = InMemorySettingsBackend::new();
        backend.upsert(&NewSetting::new("a", "1")).await.unwrap();

        let updates = BTreeMap::from([
            ("a".to_string(), "2".to_string()),
            ("missing".to_string(), "3".to_string()),
        ]);
        assert_eq!(backend.update_values(&updates).await.unwrap(), vec!["a"]);
        assert_eq!(backend.raw_value("a").as_deref(), Some("2"));
        assert!(backend.row("missing").is_none());
    }

    #[tokio::test]
    async fn test_update_values_is_all_or_nothing() {
        let backend = InMemorySettingsBackend::new();
        backend.upsert(&NewSetting::new("a", "1")).await.unwrap();
        backend.upsert(&NewSetting::new("z", "1")).await.unwrap();
        backend.fail_writes_for("z");

        let updates = BTreeMap::from([
            ("a".to_string(), "2".to_string()),
            ("z".to_string(), "2".to_string()),
        ]);
        assert!(backend.update_values(&updates).await.is_err());
        assert_eq!(backend.raw_value("a").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_unavailable_backend_errors() {
        let backend = InMemorySettingsBackend::new();
        backend.set_unavailable(true);
        assert!(backend.find("a").await.is_err());
        assert!(backend.list_all().await.is_err());

        backend.set_unavailable(false);
        assert!(backend.list_all().await.unwrap().is_empty());
    }
}
