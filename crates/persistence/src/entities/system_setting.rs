//! System setting entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Setting, SettingType};
use sqlx::FromRow;

/// Database row mapping for the system_settings table.
///
/// `setting_type` is kept as free text; unknown tags read back as `text`.
#[derive(Debug, Clone, FromRow)]
pub struct SystemSettingEntity {
    pub id: i64,
    pub setting_key: String,
    pub setting_value: String,
    pub setting_type: String,
    pub category: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemSettingEntity> for Setting {
    fn from(entity: SystemSettingEntity) -> Self {
        Self {
            key: entity.setting_key,
            value: entity.setting_value,
            setting_type: SettingType::from_tag(&entity.setting_type),
            category: entity.category,
            description: entity.description,
            is_public: entity.is_public,
            updated_at: entity.updated_at,
        }
    }
}
