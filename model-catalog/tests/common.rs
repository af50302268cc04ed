//! Shared fixtures: a temp models dir with a few provider documents.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

pub const ANTHROPIC_YML: &str = r#"
provider: anthropic
default_model: claude-sonnet-4-20250514
models:
  claude-3-5-sonnet-20241022:
    context_window: 200000
    max_output_tokens: 8192
    capabilities: [vision, function_calling, streaming]
    pricing:
      input: 3.0
      output: 15.0
  claude-3-haiku-20240307:
    context_window: 200000
    capabilities: [streaming]
"#;

pub const OPENAI_YML: &str = r#"
provider: openai
default_model: openai/gpt-4o-mini
models:
  gpt-4o-mini:
    context_window: 128000
    max_output_tokens: 16384
    capabilities: [streaming, tools]
    pricing: {input: 0.15, output: 0.6}
"#;

pub const OLLAMA_YML: &str = r#"
provider: ollama
models:
  llama3.2:
    context_window: 131072
    capabilities: [chat, streaming, function_calling]
    architecture:
      family: llama
    quantization:
      bits: 4
"#;

pub fn write(dir: &Path, provider: &str, body: &str) {
    std::fs::write(dir.join(format!("{}.yml", provider)), body).unwrap();
}

/// Temp dir with anthropic, openai and ollama documents.
pub fn models_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "anthropic", ANTHROPIC_YML);
    write(dir.path(), "openai", OPENAI_YML);
    write(dir.path(), "ollama", OLLAMA_YML);
    dir
}
