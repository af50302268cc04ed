//! Query API.
//!
//! All per-model accessors share one fallback policy. When the model (or the field) is
//! missing from configuration, local providers ([`ProviderId::is_local`]) get
//! conservative defaults and remote providers get `None`:
//!
//! | accessor            | local default         |
//! |---------------------|-----------------------|
//! | `pricing`           | `{0.0, 0.0}`          |
//! | `context_window`    | `4096`                |
//! | `capabilities`      | `[chat, streaming]`   |
//! | `max_output_tokens` | `4096`                |
//!
//! These never fail; only the default-model accessors report why a lookup failed.

use std::collections::BTreeMap;

use model_spec_core::{Capability, ModelConfig, Pricing, ProviderConfig, ProviderId};
use serde::Serialize;

use crate::catalog::ModelCatalog;
use crate::error::{CatalogError, DefaultModelError};

pub const LOCAL_DEFAULT_CONTEXT_WINDOW: u64 = 4096;
pub const LOCAL_DEFAULT_MAX_OUTPUT_TOKENS: u64 = 4096;

/// Everything known about one model, with the fallback policy applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedModel {
    pub provider: String,
    pub model: String,
    /// Whether the model has an entry in the provider's document.
    pub configured: bool,
    pub context_window: Option<u64>,
    pub max_output_tokens: Option<u64>,
    pub capabilities: Option<Vec<Capability>>,
    pub pricing: Option<Pricing>,
}

/// Estimated cost in the pricing currency (USD in the shipped documents).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cost {
    pub input: f64,
    pub output: f64,
    pub total: f64,
}

fn is_local(provider: &str) -> bool {
    ProviderId::parse(provider).is_some_and(|p| p.is_local())
}

/// Exact name, then `<provider>/<model>`, then `<model>` with a `<provider>/` prefix removed.
fn find_model<'a>(config: &'a ProviderConfig, provider: &str, model: &str) -> Option<&'a ModelConfig> {
    if let Some(found) = config.model(model) {
        return Some(found);
    }
    if !model.contains('/') {
        return config.model(&format!("{}/{}", provider, model));
    }
    model
        .strip_prefix(provider)
        .and_then(|rest| rest.strip_prefix('/'))
        .and_then(|bare| config.model(bare))
}

impl ModelCatalog {
    fn with_model<T>(
        &self,
        provider: &str,
        model: &str,
        f: impl FnOnce(&ModelConfig) -> Option<T>,
    ) -> Option<T> {
        let config = self.entry(provider).config().cloned()?;
        find_model(&config, provider, model).and_then(f)
    }

    /// The configured entry for a model, as written.
    pub fn model_config(&self, provider: impl AsRef<str>, model: &str) -> Option<ModelConfig> {
        self.with_model(provider.as_ref(), model, |m| Some(m.clone()))
    }

    /// Per-1M-token pricing.
    pub fn pricing(&self, provider: impl AsRef<str>, model: &str) -> Option<Pricing> {
        self.model_config_with_defaults(provider, model).pricing
    }

    pub fn context_window(&self, provider: impl AsRef<str>, model: &str) -> Option<u64> {
        self.model_config_with_defaults(provider, model).context_window
    }

    /// Capability tags. A configured model with an empty list reports it as is for
    /// remote providers; local providers fall back to the defaults.
    pub fn capabilities(&self, provider: impl AsRef<str>, model: &str) -> Option<Vec<Capability>> {
        self.model_config_with_defaults(provider, model).capabilities
    }

    pub fn max_output_tokens(&self, provider: impl AsRef<str>, model: &str) -> Option<u64> {
        self.model_config_with_defaults(provider, model).max_output_tokens
    }

    pub fn supports(&self, provider: impl AsRef<str>, model: &str, capability: &Capability) -> bool {
        self.capabilities(provider, model)
            .is_some_and(|caps| caps.contains(capability))
    }

    /// Cost of a request from token counts. `None` when there is no pricing at all;
    /// a side with no price counts as zero.
    pub fn estimate_cost(
        &self,
        provider: impl AsRef<str>,
        model: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Option<Cost> {
        let pricing = self.pricing(provider, model)?;
        if pricing.input.is_none() && pricing.output.is_none() {
            return None;
        }
        let input = input_tokens as f64 / 1_000_000.0 * pricing.input.unwrap_or(0.0);
        let output = output_tokens as f64 / 1_000_000.0 * pricing.output.unwrap_or(0.0);
        Some(Cost {
            input,
            output,
            total: input + output,
        })
    }

    /// The configured default model, without a redundant `<provider>/` prefix.
    pub fn default_model(&self, provider: impl AsRef<str>) -> Result<String, DefaultModelError> {
        let provider = provider.as_ref();
        let config = self
            .entry(provider)
            .config()
            .cloned()
            .ok_or(DefaultModelError::ConfigNotFound)?;
        let model = config
            .default_model
            .as_deref()
            .ok_or(DefaultModelError::MissingDefaultModel)?;
        let prefix = format!("{}/", provider);
        Ok(model.strip_prefix(&prefix).unwrap_or(model).to_string())
    }

    /// Like [`default_model`](Self::default_model), but the error names the document path
    /// and field. Meant for startup checks that should fail fast.
    ///
    /// A document that exists but cannot be used is reported as `ParseFailure` or
    /// `StorageUnavailable`, not as missing.
    pub fn require_default_model(&self, provider: impl AsRef<str>) -> Result<String, CatalogError> {
        let provider = provider.as_ref();
        match self.default_model(provider) {
            Ok(model) => Ok(model),
            Err(DefaultModelError::MissingDefaultModel) => Err(CatalogError::MissingDefaultModel {
                provider: provider.to_string(),
                path: self.config_path(provider),
            }),
            Err(DefaultModelError::ConfigNotFound) => match self.check_document(provider) {
                Err(e) => Err(e),
                // Written since it was cached; the cached miss is what lookups see.
                Ok(_) => Err(CatalogError::ConfigNotFound {
                    provider: provider.to_string(),
                    path: self.config_path(provider),
                }),
            },
        }
    }

    /// Every configured model. Empty for unknown or unconfigured providers.
    pub fn all_models(&self, provider: impl AsRef<str>) -> BTreeMap<String, ModelConfig> {
        self.entry(provider.as_ref())
            .config()
            .map(|c| c.models.clone())
            .unwrap_or_default()
    }

    /// Pricing of every model that has one.
    pub fn all_pricing(&self, provider: impl AsRef<str>) -> BTreeMap<String, Pricing> {
        self.collect_models(provider.as_ref(), |m| m.pricing)
    }

    /// Context window of every model that has one.
    pub fn all_context_windows(&self, provider: impl AsRef<str>) -> BTreeMap<String, u64> {
        self.collect_models(provider.as_ref(), |m| m.context_window)
    }

    fn collect_models<T>(
        &self,
        provider: &str,
        f: impl Fn(&ModelConfig) -> Option<T>,
    ) -> BTreeMap<String, T> {
        let Some(config) = self.entry(provider).config().cloned() else {
            return BTreeMap::new();
        };
        config
            .models
            .iter()
            .filter_map(|(name, m)| f(m).map(|v| (name.clone(), v)))
            .collect()
    }

    /// Pricing, context window, capabilities and max output tokens in one lookup.
    ///
    /// Every field comes from the same cached document, even if a reload runs meanwhile.
    pub fn model_config_with_defaults(&self, provider: impl AsRef<str>, model: &str) -> ResolvedModel {
        let provider = provider.as_ref();
        let local = is_local(provider);
        let config = self.entry(provider).config().cloned();
        let found = config
            .as_deref()
            .and_then(|c| find_model(c, provider, model));

        let capabilities = found
            .filter(|m| !(local && m.capabilities.is_empty()))
            .map(|m| m.capabilities.clone())
            .or_else(|| local.then(Capability::local_defaults));
        ResolvedModel {
            provider: provider.to_string(),
            model: model.to_string(),
            configured: found.is_some(),
            context_window: found
                .and_then(|m| m.context_window)
                .or_else(|| local.then_some(LOCAL_DEFAULT_CONTEXT_WINDOW)),
            max_output_tokens: found
                .and_then(|m| m.max_output_tokens)
                .or_else(|| local.then_some(LOCAL_DEFAULT_MAX_OUTPUT_TOKENS)),
            capabilities,
            pricing: found
                .and_then(|m| m.pricing)
                .or_else(|| local.then(Pricing::free)),
        }
    }
}
