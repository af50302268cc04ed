//! # model-catalog
//!
//! Per-provider model metadata (pricing, context window, capabilities, max output tokens,
//! default model) loaded from one YAML document per provider and cached for repeated
//! lookup.
//!
//! ## Layers
//!
//! - [`env_config::DirResolver`]: picks the directory holding `<provider>.yml` documents
//!   (runtime override, `MODEL_CATALOG_DIR`, XDG config, `./config/models`, the bundled
//!   documents, ancestors of the working dir, then the data dir).
//! - [`loader`]: reads a document and normalizes its keys through the allow-list in
//!   [`model_spec_core::key`]. Parse failures are logged and read as "not found".
//! - [`cache`]: [`ConfigCache`] memoizes one [`CacheEntry`] per provider, `NotFound`
//!   included; invalidation swaps the whole table.
//! - [`query`]: the accessors on [`ModelCatalog`], with defaults for local providers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use model_catalog::{ModelCatalog, ProviderId};
//!
//! let catalog = ModelCatalog::with_config_dir("config/models");
//! let window = catalog.context_window(ProviderId::Anthropic, "claude-3-5-sonnet-20241022");
//! let model = catalog.default_model("openai").unwrap_or_else(|_| "gpt-4o-mini".to_string());
//! let local = catalog.model_config_with_defaults(ProviderId::Ollama, "some-local-model");
//! assert_eq!(local.context_window, Some(4096));
//! # let _ = (window, model);
//! ```

pub mod cache;
mod catalog;
mod error;
pub mod loader;
pub mod query;

pub use cache::{CacheEntry, ConfigCache};
pub use catalog::ModelCatalog;
pub use error::{CatalogError, DefaultModelError};
pub use loader::{FileLoader, ProviderLoader, DOCUMENT_EXTENSIONS};
pub use query::{Cost, ResolvedModel, LOCAL_DEFAULT_CONTEXT_WINDOW, LOCAL_DEFAULT_MAX_OUTPUT_TOKENS};

pub use env_config::{DirResolver, Probe, Resolved};
pub use model_spec_core::{
    normalize_key, Capability, ConfigKey, ConfigValue, ModelConfig, Pricing, ProviderConfig,
    ProviderId,
};
