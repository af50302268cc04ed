//! Typed views over a normalized provider document.
//!
//! Field values are not validated: a field of the wrong type reads as absent. Only a
//! document whose top level is not a mapping is rejected ([`ShapeError`]).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::capability::Capability;
use crate::key::ConfigKey;
use crate::value::ConfigValue;

/// Per-1M-token prices. Either side may be missing from the document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Pricing {
    pub input: Option<f64>,
    pub output: Option<f64>,
}

impl Pricing {
    pub fn new(input: f64, output: f64) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
        }
    }

    /// `{0.0, 0.0}`: what a local provider reports for an unconfigured model.
    pub fn free() -> Self {
        Self::new(0.0, 0.0)
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        let map = value.as_map()?;
        Some(Self {
            input: map.get(&ConfigKey::Input).and_then(ConfigValue::as_f64),
            output: map.get(&ConfigKey::Output).and_then(ConfigValue::as_f64),
        })
    }
}

/// One model entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub context_window: Option<u64>,
    pub max_output_tokens: Option<u64>,
    pub capabilities: Vec<Capability>,
    pub pricing: Option<Pricing>,
    /// Architecture, quantization, feature flags and anything else the entry carries.
    /// Normalized but not interpreted.
    #[serde(flatten)]
    pub extra: BTreeMap<ConfigKey, ConfigValue>,
}

impl ModelConfig {
    /// Builds from a model entry. A `null` or non-mapping entry gives an empty config.
    pub fn from_value(value: &ConfigValue) -> Self {
        let Some(map) = value.as_map() else {
            return Self::default();
        };
        let mut config = Self::default();
        for (key, value) in map {
            match key {
                ConfigKey::Name => config.name = value.as_str().map(str::to_string),
                ConfigKey::ContextWindow => config.context_window = value.as_u64(),
                ConfigKey::MaxOutputTokens => config.max_output_tokens = value.as_u64(),
                ConfigKey::Capabilities => config.capabilities = parse_capabilities(value),
                ConfigKey::Pricing => config.pricing = Pricing::from_value(value),
                _ => {
                    config.extra.insert(key.clone(), value.clone());
                }
            }
        }
        config
    }

    pub fn supports(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Accepts a list of tags (`[vision, streaming]`) or a flag map (`{vision: true}`).
fn parse_capabilities(value: &ConfigValue) -> Vec<Capability> {
    match value {
        ConfigValue::List(items) => items
            .iter()
            .filter_map(ConfigValue::as_str)
            .map(Capability::from)
            .collect(),
        ConfigValue::Map(flags) => flags
            .iter()
            .filter(|(_, on)| on.as_bool().unwrap_or(false))
            .map(|(key, _)| Capability::from(key.as_str()))
            .collect(),
        _ => Vec::new(),
    }
}

/// A whole provider document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProviderConfig {
    /// Informational `provider` field.
    pub provider: Option<String>,
    pub default_model: Option<String>,
    pub models: BTreeMap<String, ModelConfig>,
    /// Every other top-level entry, including the free-form `metadata` field.
    pub metadata: BTreeMap<ConfigKey, ConfigValue>,
}

/// The document's top level is not a mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a mapping at the top level, found {0}")]
pub struct ShapeError(pub &'static str);

impl ProviderConfig {
    /// Builds from a normalized document. An empty document (`null`) yields an empty config.
    pub fn from_value(value: &ConfigValue) -> Result<Self, ShapeError> {
        let map = match value {
            ConfigValue::Map(map) => map,
            ConfigValue::Null => return Ok(Self::default()),
            ConfigValue::List(_) => return Err(ShapeError("a list")),
            _ => return Err(ShapeError("a scalar")),
        };
        let mut config = Self::default();
        for (key, value) in map {
            match key {
                ConfigKey::Provider => config.provider = value.as_str().map(str::to_string),
                ConfigKey::DefaultModel => {
                    config.default_model = value.as_str().map(str::to_string)
                }
                ConfigKey::Models => {
                    if let Some(models) = value.as_map() {
                        config.models = models
                            .iter()
                            .map(|(name, entry)| {
                                (name.as_str().to_string(), ModelConfig::from_value(entry))
                            })
                            .collect();
                    }
                }
                _ => {
                    config.metadata.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(config)
    }

    pub fn model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }
}
