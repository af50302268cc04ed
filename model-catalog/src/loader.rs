//! Document loader: one YAML file per provider under the resolved models directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use env_config::DirResolver;
use model_spec_core::{ConfigValue, ProviderConfig, ProviderId};

use crate::cache::CacheEntry;
use crate::error::CatalogError;

/// Extensions tried, in order, for `<dir>/<provider>.<ext>`.
pub const DOCUMENT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Produces the cache entry for one provider. Loads must be repeatable: the cache may
/// call this more than once for the same provider under contention.
pub trait ProviderLoader: Send + Sync {
    fn load(&self, provider: ProviderId) -> CacheEntry;
}

/// Parses and normalizes a document's text.
pub fn parse_document(text: &str) -> Result<ProviderConfig, String> {
    if text.trim().is_empty() {
        return Ok(ProviderConfig::default());
    }
    let value: ConfigValue = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    ProviderConfig::from_value(&value).map_err(|e| e.to_string())
}

/// Reads and parses one document file.
pub fn load_document(path: &Path) -> Result<ProviderConfig, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::StorageUnavailable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    // Invalid UTF-8 is a parse failure; the read itself succeeded.
    let text = std::str::from_utf8(&bytes).map_err(|e| CatalogError::ParseFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_document(text).map_err(|message| CatalogError::ParseFailure {
        path: path.to_path_buf(),
        message,
    })
}

/// Loads provider documents from the directory chosen by a [`DirResolver`].
#[derive(Debug, Clone)]
pub struct FileLoader {
    resolver: Arc<DirResolver>,
}

impl FileLoader {
    pub fn new(resolver: Arc<DirResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<DirResolver> {
        &self.resolver
    }

    /// Where the document for `provider` is, or would be expected: the first existing
    /// candidate, else `<dir>/<provider>.yml`.
    ///
    /// `provider` is only joined into a path for names in [`ProviderId`]; anything else
    /// yields the expected path for error messages without touching storage.
    pub fn document_path(&self, provider: &str) -> PathBuf {
        let dir = self.resolver.resolve();
        if ProviderId::parse(provider).is_some() {
            for ext in DOCUMENT_EXTENSIONS {
                let candidate = dir.join(format!("{}.{}", provider, ext));
                if candidate.is_file() {
                    return candidate;
                }
            }
        }
        dir.join(format!("{}.{}", provider, DOCUMENT_EXTENSIONS[0]))
    }

    /// Loads without caching, keeping the failure reason.
    pub fn try_load(&self, provider: ProviderId) -> Result<ProviderConfig, CatalogError> {
        let dir = self.resolver.resolve();
        for ext in DOCUMENT_EXTENSIONS {
            let path = dir.join(format!("{}.{}", provider, ext));
            match path.try_exists() {
                Ok(true) => return load_document(&path),
                Ok(false) => continue,
                Err(e) => {
                    return Err(CatalogError::StorageUnavailable {
                        path,
                        message: e.to_string(),
                    })
                }
            }
        }
        Err(CatalogError::ConfigNotFound {
            provider: provider.to_string(),
            path: dir.join(format!("{}.{}", provider, DOCUMENT_EXTENSIONS[0])),
        })
    }
}

impl ProviderLoader for FileLoader {
    fn load(&self, provider: ProviderId) -> CacheEntry {
        match self.try_load(provider) {
            Ok(config) => {
                tracing::debug!(
                    provider = provider.as_str(),
                    models = config.models.len(),
                    "model config loaded"
                );
                CacheEntry::Loaded(Arc::new(config))
            }
            Err(CatalogError::ConfigNotFound { path, .. }) => {
                tracing::debug!(provider = provider.as_str(), path = %path.display(), "no model config");
                CacheEntry::NotFound
            }
            Err(e) => {
                tracing::warn!(provider = provider.as_str(), path = %e.path().display(), error = %e, "model config unusable; treating as not found");
                CacheEntry::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_spec_core::ConfigKey;

    fn loader_for(dir: &Path) -> FileLoader {
        FileLoader::new(Arc::new(DirResolver::with_dir(dir)))
    }

    #[test]
    fn loads_and_normalizes_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("groq.yml"),
            "provider: groq\ndefault_model: llama-3.1-8b-instant\nmodels:\n  llama-3.1-8b-instant:\n    context_window: 131072\n    x_rate_limit: 30\n",
        )
        .unwrap();
        let config = loader_for(tmp.path()).try_load(ProviderId::Groq).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("llama-3.1-8b-instant"));
        let model = config.model("llama-3.1-8b-instant").unwrap();
        assert_eq!(model.context_window, Some(131_072));
        assert!(model
            .extra
            .contains_key(&ConfigKey::Other("x_rate_limit".into())));
    }

    #[test]
    fn yaml_extension_is_second_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("mistral.yaml"), "default_model: mistral-large\n").unwrap();
        let loader = loader_for(tmp.path());
        assert!(loader.try_load(ProviderId::Mistral).is_ok());
        assert_eq!(loader.document_path("mistral"), tmp.path().join("mistral.yaml"));
    }

    #[test]
    fn missing_document_is_config_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let loader = loader_for(tmp.path());
        let err = loader.try_load(ProviderId::XAI).unwrap_err();
        assert!(matches!(err, CatalogError::ConfigNotFound { .. }));
        assert_eq!(err.path(), tmp.path().join("xai.yml"));
        assert!(matches!(loader.load(ProviderId::XAI), CacheEntry::NotFound));
    }

    /// **Scenario**: a malformed document is a ParseFailure from `try_load` but only a
    /// NotFound entry from `load`, so other providers keep working.
    #[test]
    fn parse_failure_degrades_to_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("openai.yml"), "models: [unclosed\n").unwrap();
        std::fs::write(tmp.path().join("gemini.yml"), "- just\n- a list\n").unwrap();
        let loader = loader_for(tmp.path());
        assert!(matches!(
            loader.try_load(ProviderId::OpenAI),
            Err(CatalogError::ParseFailure { .. })
        ));
        assert!(matches!(
            loader.try_load(ProviderId::Gemini),
            Err(CatalogError::ParseFailure { .. })
        ));
        assert!(matches!(loader.load(ProviderId::OpenAI), CacheEntry::NotFound));
    }

    #[test]
    fn invalid_utf8_is_a_parse_failure() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("xai.yml"), b"default_model: grok\xff\xfe\n").unwrap();
        let loader = loader_for(tmp.path());
        let err = loader.try_load(ProviderId::XAI).unwrap_err();
        assert!(matches!(err, CatalogError::ParseFailure { .. }), "{:?}", err);
        assert_eq!(err.path(), tmp.path().join("xai.yml"));
        assert!(matches!(loader.load(ProviderId::XAI), CacheEntry::NotFound));
    }

    #[test]
    fn empty_document_is_an_empty_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("bedrock.yml"), "").unwrap();
        let config = loader_for(tmp.path()).try_load(ProviderId::Bedrock).unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn unknown_provider_path_is_not_probed() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("evil.yaml"), "default_model: x\n").unwrap();
        let loader = loader_for(tmp.path());
        assert_eq!(loader.document_path("evil"), tmp.path().join("evil.yml"));
    }

    #[test]
    fn parse_document_rejects_scalar_top_level() {
        assert!(parse_document("just a string").is_err());
        assert!(parse_document("default_model: m").is_ok());
    }
}
