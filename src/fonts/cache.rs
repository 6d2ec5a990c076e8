use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use crate::fonts::handle::FontHandle;

/// Cache key: logical family plus exact pixel size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// Logical family the resolver was configured with (not the file's family name).
    pub family: String,
    /// Exact pixel size.
    pub size_px: u32,
}

impl FontKey {
    /// Build a key.
    pub fn new(family: impl Into<String>, size_px: u32) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }
}

/// Shared cache of loaded font handles.
///
/// Entries live as long as the cache; nothing is evicted. Lookups share a read lock,
/// lookup-or-insert holds the write lock across the load so a key is loaded at most once.
#[derive(Debug, Default)]
pub struct FontCache {
    entries: RwLock<HashMap<FontKey, Arc<FontHandle>>>,
}

static GLOBAL: OnceLock<Arc<FontCache>> = OnceLock::new();

impl FontCache {
    /// Fresh, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, created on first use.
    pub fn global() -> Arc<FontCache> {
        GLOBAL.get_or_init(|| Arc::new(FontCache::new())).clone()
    }

    /// Cached handle for `key`, if present.
    pub fn get(&self, key: &FontKey) -> Option<Arc<FontHandle>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Return the cached handle for `key`, or run `load` and cache its result.
    ///
    /// `None` from `load` is not cached, so a later call retries.
    pub fn get_or_try_insert_with(
        &self,
        key: &FontKey,
        load: impl FnOnce() -> Option<FontHandle>,
    ) -> Option<Arc<FontHandle>> {
        if let Some(hit) = self.get(key) {
            tracing::trace!(family = %key.family, size_px = key.size_px, "font cache hit");
            return Some(hit);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = entries.get(key) {
            return Some(hit.clone());
        }
        let handle = Arc::new(load()?);
        entries.insert(key.clone(), handle.clone());
        Some(handle)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/cache.rs"]
mod tests;
