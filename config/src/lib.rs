//! Locate the directory holding per-provider model documents.
//!
//! [`DirResolver`] runs an ordered list of probes and returns the first directory that
//! exists, falling back to the data-dir location when none does. The first probe reads
//! the explicitly configured directory: a runtime override, else `MODEL_CATALOG_DIR`,
//! else `[models] dir` in `$XDG_CONFIG_HOME/model-catalog/config.toml`.
//!
//! The default documents shipped with this workspace live in `config/models/`.

mod resolver;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

pub use resolver::{resolve_in, DirResolver, Probe, ProbeContext, Resolved, MODELS_SUBDIR};
#[cfg(feature = "tracing-init")]
pub use tracing_init::{init_tracing, LOG_DIR_ENV};
pub use xdg_toml::load_models_dir;

use thiserror::Error;

/// Application name used for XDG paths (`~/.config/<APP_NAME>/config.toml`).
pub const APP_NAME: &str = "model-catalog";

/// Environment variable naming the configured models directory.
pub const MODELS_DIR_ENV: &str = "MODEL_CATALOG_DIR";

// Process env is global; tests that set variables run one at a time.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
}
