//! `ModelCatalog`: the directory resolver, loader and cache wired together.

use std::path::PathBuf;
use std::sync::Arc;

use env_config::{DirResolver, Resolved};
use model_spec_core::{ProviderConfig, ProviderId};
use once_cell::sync::Lazy;

use crate::cache::{CacheEntry, ConfigCache};
use crate::error::CatalogError;
use crate::loader::FileLoader;

static GLOBAL: Lazy<ModelCatalog> = Lazy::new(ModelCatalog::new);

/// Resolved per-provider model configuration with lazy loading and explicit reload.
///
/// Construct one per scope that needs isolation (tests use one per temp dir), or share
/// the process-wide instance from [`ModelCatalog::global`]. Query methods live in
/// [`query`](crate::query).
#[derive(Debug)]
pub struct ModelCatalog {
    resolver: Arc<DirResolver>,
    pub(crate) cache: ConfigCache<FileLoader>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCatalog {
    /// Catalog that discovers its directory (env, XDG config, working dir, ...).
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(DirResolver::new()))
    }

    /// Catalog pinned to `dir`. A `dir` that does not exist falls through to discovery.
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_resolver(Arc::new(DirResolver::with_dir(dir)))
    }

    pub fn with_resolver(resolver: Arc<DirResolver>) -> Self {
        Self {
            cache: ConfigCache::new(FileLoader::new(Arc::clone(&resolver))),
            resolver,
        }
    }

    /// Process-wide catalog, created on first use.
    pub fn global() -> &'static ModelCatalog {
        &GLOBAL
    }

    pub fn resolver(&self) -> &DirResolver {
        &self.resolver
    }

    /// Points the catalog at `dir` and drops everything loaded from the previous one.
    pub fn set_config_directory(&self, dir: impl Into<PathBuf>) {
        self.resolver.set_config_directory(dir);
        self.cache.invalidate_all();
    }

    /// Directory documents are currently read from.
    pub fn config_dir(&self) -> PathBuf {
        self.resolver.resolve()
    }

    /// Directory plus the probe that found it.
    pub fn config_dir_source(&self) -> Resolved {
        self.resolver.resolve_with_probe()
    }

    /// Path of the document for `provider`, or where it is expected.
    pub fn config_path(&self, provider: impl AsRef<str>) -> PathBuf {
        self.cache.inner().document_path(provider.as_ref())
    }

    /// Clears the cache and re-resolves the directory, then loads every known provider.
    /// Missing or broken documents become cached `NotFound`; this always returns `true`.
    pub fn reload(&self) -> bool {
        self.resolver.forget();
        self.cache.invalidate_all();
        self.cache.warm_all();
        tracing::debug!(dir = %self.config_dir().display(), "model catalog reloaded");
        true
    }

    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    pub fn warm(&self) {
        self.cache.warm_all();
    }

    /// Cache entry for a provider name. Names outside [`ProviderId`] are always `NotFound`
    /// and never touch storage or the cache.
    pub(crate) fn entry(&self, provider: &str) -> CacheEntry {
        match ProviderId::parse(provider) {
            Some(id) => self.cache.get(id),
            None => CacheEntry::NotFound,
        }
    }

    /// Loaded document for `provider`, if any.
    pub fn provider_config(&self, provider: impl AsRef<str>) -> Option<Arc<ProviderConfig>> {
        self.entry(provider.as_ref()).config().cloned()
    }

    /// Reads the document directly, bypassing the cache, and reports why it is unusable.
    pub fn check_document(&self, provider: impl AsRef<str>) -> Result<ProviderConfig, CatalogError> {
        let name = provider.as_ref();
        match ProviderId::parse(name) {
            Some(id) => self.cache.inner().try_load(id),
            None => Err(CatalogError::ConfigNotFound {
                provider: name.to_string(),
                path: self.config_path(name),
            }),
        }
    }

    /// Providers that have a loaded document, loading any not yet cached.
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::all()
            .iter()
            .copied()
            .filter(|p| self.cache.get(*p).is_loaded())
            .collect()
    }

    /// Number of cached entries (loaded or `NotFound`).
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
