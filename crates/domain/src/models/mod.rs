//! Domain models for the hotel settings service.

pub mod catalogue;
pub mod hotel;
pub mod setting;

pub use catalogue::default_settings;
pub use hotel::{BusinessConfig, ContactDisplay, HotelInfo};
pub use setting::{
    BulkUpdateSettingsRequest, BulkUpdateSettingsResponse, CategorySettings, GroupedSettings,
    NewSetting, Setting, SettingDetailResponse, SettingEntry, SettingType, SettingValue,
    UpsertSettingRequest,
};
