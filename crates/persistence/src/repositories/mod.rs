//! Repository implementations for database operations.

pub mod api_key;
pub mod system_setting;

pub use api_key::ApiKeyRepository;
pub use system_setting::SystemSettingRepository;
