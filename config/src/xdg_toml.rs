//! Read the `[models]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.
//!
//! ```toml
//! [models]
//! dir = "/srv/llm/models"   # relative paths are taken from the config file's directory
//! ```

use std::path::PathBuf;

use crate::LoadError;

fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn xdg_config_path(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let base = config_home()
        .ok_or_else(|| LoadError::XdgPath("no config directory on this platform".to_string()))?;
    let path = base.join(app_name).join("config.toml");
    if path.exists() {
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    models: ModelsSection,
}

#[derive(serde::Deserialize, Default)]
struct ModelsSection {
    dir: Option<PathBuf>,
}

/// Returns `[models] dir`. Missing file, section or key returns `None`.
pub fn load_models_dir(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let path = match xdg_config_path(app_name)? {
        Some(p) => p,
        None => return Ok(None),
    };
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.models.dir.map(|dir| match path.parent() {
        Some(base) if dir.is_relative() => base.join(dir),
        _ => dir,
    }))
}
