//! System setting repository: the PostgreSQL settings backend.

use std::collections::BTreeMap;

use domain::models::{NewSetting, Setting};
use domain::services::{SettingsBackend, SettingsError};
use sqlx::PgPool;

use crate::entities::SystemSettingEntity;
use crate::metrics::QueryTimer;

const SELECT_COLUMNS: &str = r#"
    SELECT id, setting_key, setting_value, setting_type, category, description,
           is_public, created_at, updated_at
    FROM system_settings
"#;

/// Repository for the system_settings table.
#[derive(Clone)]
pub struct SystemSettingRepository {
    pool: PgPool,
}

impl SystemSettingRepository {
    /// Creates a new SystemSettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_system_setting");
        let result = sqlx::query_as::<_, SystemSettingEntity>(&format!(
            "{} WHERE setting_key = $1",
            SELECT_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Inserts a setting or replaces value, type, category and description.
    /// `is_public` is only written on insert.
    pub async fn upsert(&self, setting: &NewSetting) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("upsert_system_setting");
        let result = sqlx::query(
            r#"
            INSERT INTO system_settings
                (setting_key, setting_value, setting_type, category, description, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (setting_key)
            DO UPDATE SET setting_value = EXCLUDED.setting_value,
                          setting_type = EXCLUDED.setting_type,
                          category = EXCLUDED.category,
                          description = EXCLUDED.description,
                          updated_at = NOW()
            "#,
        )
        .bind(&setting.key)
        .bind(&setting.value)
        .bind(setting.setting_type.as_str())
        .bind(&setting.category)
        .bind(&setting.description)
        .bind(setting.is_public)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|_| ())
    }

    /// Inserts a setting unless the key already exists.
    pub async fn insert_if_absent(&self, setting: &NewSetting) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("insert_system_setting_if_absent");
        let result = sqlx::query(
            r#"
            INSERT INTO system_settings
                (setting_key, setting_value, setting_type, category, description, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (setting_key) DO NOTHING
            "#,
        )
        .bind(&setting.key)
        .bind(&setting.value)
        .bind(setting.setting_type.as_str())
        .bind(&setting.category)
        .bind(&setting.description)
        .bind(setting.is_public)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }

    pub async fn list_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_system_settings_by_category");
        let result = sqlx::query_as::<_, SystemSettingEntity>(&format!(
            "{} WHERE category = $1 ORDER BY setting_key",
            SELECT_COLUMNS
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    pub async fn list_all(&self) -> Result<Vec<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_system_settings");
        let result = sqlx::query_as::<_, SystemSettingEntity>(&format!(
            "{} ORDER BY category, setting_key",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    pub async fn list_public(&self) -> Result<Vec<SystemSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_public_system_settings");
        let result = sqlx::query_as::<_, SystemSettingEntity>(&format!(
            "{} WHERE is_public = TRUE ORDER BY setting_key",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    pub async fn delete(&self, key: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_system_setting");
        let result = sqlx::query("DELETE FROM system_settings WHERE setting_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("system_setting_exists");
        let result: Result<bool, sqlx::Error> = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM system_settings WHERE setting_key = $1)",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result
    }

    /// Updates values of existing keys in one transaction.
    ///
    /// Any failure drops the transaction, rolling back earlier updates.
    /// Returns the keys that matched a row, in key order.
    pub async fn update_values(
        &self,
        updates: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("update_system_setting_values");
        let result = async {
            let mut tx = self.pool.begin().await?;
            let mut updated = Vec::with_capacity(updates.len());

            for (key, value) in updates {
                let result = sqlx::query(
                    r#"
                    UPDATE system_settings
                    SET setting_value = $2, updated_at = NOW()
                    WHERE setting_key = $1
                    "#,
                )
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await?;
                if result.rows_affected() > 0 {
                    updated.push(key.clone());
                }
            }

            tx.commit().await?;
            Ok(updated)
        }
        .await;
        timer.finish(&result);
        result
    }
}

#[async_trait::async_trait]
impl SettingsBackend for SystemSettingRepository {
    async fn find(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        Ok(self.find_by_key(key).await?.map(Setting::from))
    }

    async fn upsert(&self, setting: &NewSetting) -> Result<(), SettingsError> {
        Ok(SystemSettingRepository::upsert(self, setting).await?)
    }

    async fn insert_if_absent(&self, setting: &NewSetting) -> Result<bool, SettingsError> {
        Ok(SystemSettingRepository::insert_if_absent(self, setting).await?)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Setting>, SettingsError> {
        let rows = SystemSettingRepository::list_by_category(self, category).await?;
        Ok(rows.into_iter().map(Setting::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Setting>, SettingsError> {
        let rows = SystemSettingRepository::list_all(self).await?;
        Ok(rows.into_iter().map(Setting::from).collect())
    }

    async fn list_public(&self) -> Result<Vec<Setting>, SettingsError> {
        let rows = SystemSettingRepository::list_public(self).await?;
        Ok(rows.into_iter().map(Setting::from).collect())
    }

    async fn delete(&self, key: &str) -> Result<bool, SettingsError> {
        Ok(SystemSettingRepository::delete(self, key).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool, SettingsError> {
        Ok(SystemSettingRepository::exists(self, key).await?)
    }

    async fn update_values(
        &self,
        updates: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, SettingsError> {
        Ok(SystemSettingRepository::update_values(self, updates).await?)
    }
}
