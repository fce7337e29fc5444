//! Read cache for coerced setting values.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::SettingValue;

/// Coerced values keyed by setting key.
///
/// Owned by a single [`super::SettingsStore`]; never shared between stores.
/// Locks are only held for the map operation itself.
///
/// Every invalidation bumps a generation counter. A reader that loaded a
/// value from storage passes the generation it observed before the load to
/// [`SettingsCache::insert_if_unchanged`], which drops the value if any
/// invalidation happened in between.
#[derive(Debug, Default)]
pub struct SettingsCache {
    inner: RwLock<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, SettingValue>,
    generation: u64,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.read().entries.get(key).cloned()
    }

    /// Current generation; take it before loading from storage.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Caches `value` unless an invalidation ran since `generation` was read.
    /// Returns whether the value was stored.
    pub fn insert_if_unchanged(&self, key: &str, value: SettingValue, generation: u64) -> bool {
        let mut state = self.write();
        if state.generation != generation {
            return false;
        }
        state.entries.insert(key.to_string(), value);
        true
    }

    pub fn invalidate(&self, key: &str) {
        let mut state = self.write();
        state.entries.remove(key);
        state.generation += 1;
    }

    pub fn invalidate_many<'a>(&self, keys: impl IntoIterator<Item = &'a str>) {
        let mut state = self.write();
        for key in keys {
            state.entries.remove(key);
        }
        state.generation += 1;
    }

    pub fn clear(&self) {
        let mut state = self.write();
        state.entries.clear();
        state.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(cache: &SettingsCache, key: &str, value: SettingValue) {
        assert!(cache.insert_if_unchanged(key, value, cache.generation()));
    }

    #[test]
    fn test_insert_and_get() {
        let cache = SettingsCache::new();
        assert!(cache.get("hotel_name").is_none());

        put(&cache, "hotel_name", SettingValue::from("Grand"));
        assert_eq!(cache.get("hotel_name"), Some(SettingValue::from("Grand")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate() {
        let cache = SettingsCache::new();
        put(&cache, "a", SettingValue::Number(1.0));
        put(&cache, "b", SettingValue::Number(2.0));
        put(&cache, "c", SettingValue::Number(3.0));

        cache.invalidate("a");
        assert!(cache.get("a").is_none());

        cache.invalidate_many(["b", "missing"]);
        assert!(cache.get("b").is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_caches_are_independent() {
        let first = SettingsCache::new();
        let second = SettingsCache::new();
        put(&first, "x", SettingValue::Boolean(true));
        assert!(second.get("x").is_none());
    }

    #[test]
    fn test_insert_dropped_after_invalidation() {
        let cache = SettingsCache::new();
        let before_load = cache.generation();

        cache.invalidate("hotel_name");
        assert!(!cache.insert_if_unchanged("hotel_name", SettingValue::from("Old"), before_load));
        assert!(cache.get("hotel_name").is_none());

        let current = cache.generation();
        assert!(cache.insert_if_unchanged("hotel_name", SettingValue::from("New"), current));
        assert_eq!(cache.get("hotel_name"), Some(SettingValue::from("New")));
    }

    #[test]
    fn test_clear_bumps_generation() {
        let cache = SettingsCache::new();
        let before = cache.generation();
        cache.clear();
        assert!(cache.generation() > before);
    }
}
