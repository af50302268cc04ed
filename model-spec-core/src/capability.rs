//! Capability tags attached to a model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A model capability. Tags outside the known set are kept verbatim in [`Capability::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Chat,
    Streaming,
    Vision,
    FunctionCalling,
    Embeddings,
    Audio,
    Tools,
    JsonMode,
    SystemMessages,
    Reasoning,
    Other(String),
}

impl Capability {
    pub fn as_str(&self) -> &str {
        match self {
            Capability::Chat => "chat",
            Capability::Streaming => "streaming",
            Capability::Vision => "vision",
            Capability::FunctionCalling => "function_calling",
            Capability::Embeddings => "embeddings",
            Capability::Audio => "audio",
            Capability::Tools => "tools",
            Capability::JsonMode => "json_mode",
            Capability::SystemMessages => "system_messages",
            Capability::Reasoning => "reasoning",
            Capability::Other(s) => s,
        }
    }

    /// Capabilities assumed for a local-provider model that has no configured entry.
    pub fn local_defaults() -> Vec<Capability> {
        vec![Capability::Chat, Capability::Streaming]
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "chat" => Capability::Chat,
            "streaming" => Capability::Streaming,
            "vision" => Capability::Vision,
            "function_calling" => Capability::FunctionCalling,
            "embeddings" => Capability::Embeddings,
            "audio" => Capability::Audio,
            "tools" => Capability::Tools,
            "json_mode" => Capability::JsonMode,
            "system_messages" => Capability::SystemMessages,
            "reasoning" => Capability::Reasoning,
            other => Capability::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Capability::from(s.as_str()))
    }
}
