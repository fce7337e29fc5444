//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod api_key;
pub mod system_setting;

pub use api_key::ApiKeyEntity;
pub use system_setting::SystemSettingEntity;
