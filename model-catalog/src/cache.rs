//! Per-provider memoization over a [`ProviderLoader`].
//!
//! The store is a `DashMap` behind an `Arc` that is swapped wholesale on invalidation.
//! A lookup takes a handle to the current table, reads or populates it, and never holds
//! the outer lock while loading. Readers therefore see either the old table or the new
//! one, never a mix, and a populate racing an invalidation cannot deadlock with it.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use model_spec_core::{ProviderConfig, ProviderId};

use crate::loader::ProviderLoader;

/// Cached outcome of loading one provider.
///
/// `NotFound` is cached too, so a provider without a document is not re-probed on every
/// call. "Not yet loaded" is the absence of an entry.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Loaded(Arc<ProviderConfig>),
    NotFound,
}

impl CacheEntry {
    pub fn config(&self) -> Option<&Arc<ProviderConfig>> {
        match self {
            CacheEntry::Loaded(config) => Some(config),
            CacheEntry::NotFound => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CacheEntry::Loaded(_))
    }
}

type Table = DashMap<ProviderId, CacheEntry>;

/// Lazily populated, explicitly invalidated provider cache.
pub struct ConfigCache<L> {
    loader: L,
    // `None` until first use.
    store: RwLock<Option<Arc<Table>>>,
}

impl<L> ConfigCache<L>
where
    L: ProviderLoader,
{
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            store: RwLock::new(None),
        }
    }

    pub fn inner(&self) -> &L {
        &self.loader
    }

    /// Handle to the current table, creating it on first use.
    fn table(&self) -> Arc<Table> {
        if let Some(table) = self
            .store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(table);
        }
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(store.get_or_insert_with(|| Arc::new(Table::new())))
    }

    fn is_current(&self, table: &Arc<Table>) -> bool {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, table))
    }

    /// Cached entry for `provider`, loading it on a miss.
    ///
    /// Concurrent misses may each load; the first entry stored is kept and returned to
    /// every caller. If the table was replaced while loading, the fresh result is
    /// returned without being cached.
    pub fn get(&self, provider: ProviderId) -> CacheEntry {
        let table = self.table();
        if let Some(entry) = table.get(&provider) {
            return entry.value().clone();
        }

        let loaded = self.loader.load(provider);
        if !self.is_current(&table) {
            tracing::debug!(
                provider = provider.as_str(),
                "cache invalidated during load; returning uncached"
            );
            return loaded;
        }
        tracing::debug!(
            provider = provider.as_str(),
            loaded = loaded.is_loaded(),
            "cache populated"
        );
        let stored = table.entry(provider).or_insert(loaded);
        stored.value().clone()
    }

    /// Cached entry without loading.
    pub fn peek(&self, provider: ProviderId) -> Option<CacheEntry> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .as_ref()
            .and_then(|table| table.get(&provider).map(|e| e.value().clone()))
    }

    /// Drops every entry by installing a fresh empty table.
    pub fn invalidate_all(&self) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        *store = Some(Arc::new(Table::new()));
        tracing::debug!("model config cache invalidated");
    }

    /// Loads every known provider into the current table.
    pub fn warm_all(&self) {
        for provider in ProviderId::all() {
            self.get(*provider);
        }
        tracing::debug!(entries = self.len(), "model config cache warmed");
    }

    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |table| table.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L> std::fmt::Debug for ConfigCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ConfigCache")
            .field("created", &store.is_some())
            .field("entries", &store.as_ref().map_or(0, |t| t.len()))
            .finish()
    }
}
