//! HTTP route handlers.

pub mod admin_settings;
pub mod health;
pub mod hotel;
pub mod settings;
