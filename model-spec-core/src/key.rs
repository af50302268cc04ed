//! Config key allow-list.
//!
//! Every key read from a provider document goes through [`normalize_key`]. Keys in the
//! table below become a fixed [`ConfigKey`] variant; anything else is kept as the
//! original text in [`ConfigKey::Other`]. The table is the only source of variants, so
//! external input can never add new symbols.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! config_keys {
    ($( $(#[$doc:meta])* $variant:ident => $text:literal, )*) => {
        /// A normalized document key.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ConfigKey {
            $( $(#[$doc])* $variant, )*
            /// Key not in the allow-list, preserved as written.
            Other(String),
        }

        impl ConfigKey {
            /// Text form. For known keys this is exactly the external spelling.
            pub fn as_str(&self) -> &str {
                match self {
                    $( ConfigKey::$variant => $text, )*
                    ConfigKey::Other(s) => s,
                }
            }

            /// True when the key came from the allow-list.
            pub fn is_known(&self) -> bool {
                !matches!(self, ConfigKey::Other(_))
            }
        }

        /// Maps external key text to a [`ConfigKey`]. Unknown text passes through unchanged.
        pub fn normalize_key(raw: &str) -> ConfigKey {
            match raw {
                $( $text => ConfigKey::$variant, )*
                other => ConfigKey::Other(other.to_string()),
            }
        }
    };
}

config_keys! {
    // top level
    Provider => "provider",
    DefaultModel => "default_model",
    Models => "models",
    Metadata => "metadata",
    // model
    Name => "name",
    Description => "description",
    ContextWindow => "context_window",
    MaxOutputTokens => "max_output_tokens",
    Capabilities => "capabilities",
    Pricing => "pricing",
    Deprecated => "deprecated",
    Architecture => "architecture",
    Quantization => "quantization",
    Features => "features",
    // pricing
    Input => "input",
    Output => "output",
    CachedInput => "cached_input",
    Currency => "currency",
    // capability fields
    Chat => "chat",
    Streaming => "streaming",
    Vision => "vision",
    FunctionCalling => "function_calling",
    Embeddings => "embeddings",
    Audio => "audio",
    Tools => "tools",
    JsonMode => "json_mode",
    SystemMessages => "system_messages",
    Reasoning => "reasoning",
    // architecture / quantization
    Family => "family",
    ParameterCount => "parameter_count",
    Format => "format",
    Bits => "bits",
    Method => "method",
    // feature flags
    Enabled => "enabled",
    Supported => "supported",
}

impl From<&str> for ConfigKey {
    fn from(raw: &str) -> Self {
        normalize_key(raw)
    }
}

impl From<String> for ConfigKey {
    fn from(raw: String) -> Self {
        match normalize_key(&raw) {
            ConfigKey::Other(_) => ConfigKey::Other(raw),
            known => known,
        }
    }
}

impl ConfigKey {
    /// Re-applies the allow-list. Only an `Other` holding allow-listed text changes.
    pub fn normalize(self) -> Self {
        match self {
            ConfigKey::Other(s) => ConfigKey::from(s),
            known => known,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConfigKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_listed_keys_map_to_variants() {
        assert_eq!(normalize_key("default_model"), ConfigKey::DefaultModel);
        assert_eq!(normalize_key("context_window"), ConfigKey::ContextWindow);
        assert_eq!(normalize_key("input"), ConfigKey::Input);
        assert_eq!(normalize_key("function_calling"), ConfigKey::FunctionCalling);
    }

    #[test]
    fn unknown_keys_pass_through_verbatim() {
        let k = normalize_key("Context-Window");
        assert_eq!(k, ConfigKey::Other("Context-Window".to_string()));
        assert_eq!(k.as_str(), "Context-Window");
        assert!(!k.is_known());
    }

    #[test]
    fn text_form_matches_external_spelling() {
        for raw in ["provider", "models", "max_output_tokens", "cached_input", "gpt-4o"] {
            assert_eq!(normalize_key(raw).as_str(), raw);
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let stray = ConfigKey::Other("pricing".to_string());
        assert_eq!(stray.clone().normalize(), ConfigKey::Pricing);
        assert_eq!(stray.normalize().normalize(), ConfigKey::Pricing);
        let unknown = normalize_key("x_custom");
        assert_eq!(unknown.clone().normalize(), unknown);
    }
}
