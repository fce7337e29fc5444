//! Domain layer for the hotel settings backend.
//!
//! This crate contains:
//! - Domain models (Setting, SettingType, hotel views)
//! - The settings store with its read cache and backend seam
//! - Domain error types

pub mod models;
pub mod services;
