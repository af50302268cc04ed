//! Closed set of supported providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported provider. Not runtime-extensible: adding a provider is a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Anthropic,
    OpenAI,
    Gemini,
    Groq,
    Mistral,
    OpenRouter,
    Perplexity,
    XAI,
    DeepSeek,
    Bedrock,
    Ollama,
    LmStudio,
    Bumblebee,
}

const ALL: [ProviderId; 13] = [
    ProviderId::Anthropic,
    ProviderId::OpenAI,
    ProviderId::Gemini,
    ProviderId::Groq,
    ProviderId::Mistral,
    ProviderId::OpenRouter,
    ProviderId::Perplexity,
    ProviderId::XAI,
    ProviderId::DeepSeek,
    ProviderId::Bedrock,
    ProviderId::Ollama,
    ProviderId::LmStudio,
    ProviderId::Bumblebee,
];

impl ProviderId {
    /// Every provider, in declaration order.
    pub fn all() -> &'static [ProviderId] {
        &ALL
    }

    /// Name used for the document file (`<name>.yml`) and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Anthropic => "anthropic",
            ProviderId::OpenAI => "openai",
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
            ProviderId::Mistral => "mistral",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Perplexity => "perplexity",
            ProviderId::XAI => "xai",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Bedrock => "bedrock",
            ProviderId::Ollama => "ollama",
            ProviderId::LmStudio => "lmstudio",
            ProviderId::Bumblebee => "bumblebee",
        }
    }

    /// Self-hosted / on-device backends. These get conservative defaults for
    /// models missing from their document instead of `None`.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ProviderId::Ollama | ProviderId::LmStudio | ProviderId::Bumblebee
        )
    }

    /// Exact-name lookup; `None` for anything outside the enumeration.
    pub fn parse(name: &str) -> Option<Self> {
        ALL.iter().copied().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Returned by [`ProviderId::from_str`] for names outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
