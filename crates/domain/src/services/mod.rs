//! Domain services for the hotel settings backend.
//!
//! Services contain business logic that operates on domain models.

pub mod cache;
pub mod memory;
pub mod settings;

pub use cache::SettingsCache;
pub use memory::InMemorySettingsBackend;
pub use settings::{SettingsBackend, SettingsError, SettingsStore};
