//! Ordered probe strategies for the models directory.
//!
//! Each probe is a pure function of a [`ProbeContext`] captured once per resolution.
//! The first probe to return a path wins; [`Probe::Installed`] always returns, so
//! resolution never fails. Whether a provider document exists under the returned
//! directory is left to the loader.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::{xdg_toml, APP_NAME, MODELS_DIR_ENV};

/// Directory probed under the working directory and each of its ancestors.
pub const MODELS_SUBDIR: &str = "config/models";

/// Which strategy produced a resolved directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Runtime override, `MODEL_CATALOG_DIR`, or XDG `[models] dir`.
    Configured,
    /// `./config/models`.
    WorkingDir,
    /// `models/` next to this crate's manifest (documents shipped with the workspace).
    Bundled,
    /// `config/models` in a parent of the working directory.
    Ancestor,
    /// `<data dir>/model-catalog/models`; the unconditional fallback.
    Installed,
}

impl Probe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probe::Configured => "configured",
            Probe::WorkingDir => "working_dir",
            Probe::Bundled => "bundled",
            Probe::Ancestor => "ancestor",
            Probe::Installed => "installed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub probe: Probe,
}

/// Everything the probes look at.
#[derive(Debug, Clone, Default)]
pub struct ProbeContext {
    pub configured: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
    pub bundled: PathBuf,
    pub installed: PathBuf,
}

impl ProbeContext {
    /// Reads the process state: `override_dir` if given, else the env var, else XDG
    /// config; the current directory; and the bundled/installed locations.
    pub fn capture(override_dir: Option<&Path>) -> Self {
        let configured = override_dir
            .map(Path::to_path_buf)
            .or_else(|| {
                std::env::var_os(MODELS_DIR_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| match xdg_toml::load_models_dir(APP_NAME) {
                Ok(dir) => dir,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring XDG config while resolving models dir");
                    None
                }
            });
        Self {
            configured,
            cwd: std::env::current_dir().ok(),
            bundled: Path::new(env!("CARGO_MANIFEST_DIR")).join("models"),
            installed: installed_dir(),
        }
    }
}

fn installed_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_NAME).join("models"))
        .unwrap_or_else(|| PathBuf::from(MODELS_SUBDIR))
}

type ProbeFn = fn(&ProbeContext) -> Option<PathBuf>;

const PROBES: [(Probe, ProbeFn); 4] = [
    (Probe::Configured, probe_configured),
    (Probe::WorkingDir, probe_working_dir),
    (Probe::Bundled, probe_bundled),
    (Probe::Ancestor, probe_ancestors),
];

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

fn probe_configured(ctx: &ProbeContext) -> Option<PathBuf> {
    // A configured dir that does not exist falls through instead of failing.
    existing_dir(ctx.configured.clone()?)
}

fn probe_working_dir(ctx: &ProbeContext) -> Option<PathBuf> {
    existing_dir(ctx.cwd.as_ref()?.join(MODELS_SUBDIR))
}

fn probe_bundled(ctx: &ProbeContext) -> Option<PathBuf> {
    existing_dir(ctx.bundled.clone())
}

fn probe_ancestors(ctx: &ProbeContext) -> Option<PathBuf> {
    ctx.cwd
        .as_ref()?
        .ancestors()
        .skip(1)
        .find_map(|dir| existing_dir(dir.join(MODELS_SUBDIR)))
}

/// Runs the probes in order against `ctx`.
pub fn resolve_in(ctx: &ProbeContext) -> Resolved {
    for (probe, run) in PROBES {
        if let Some(path) = run(ctx) {
            tracing::debug!(probe = probe.as_str(), path = %path.display(), "models dir resolved");
            return Resolved { path, probe };
        }
        tracing::debug!(probe = probe.as_str(), "models dir probe missed");
    }
    tracing::debug!(path = %ctx.installed.display(), "models dir falling back to installed location");
    Resolved {
        path: ctx.installed.clone(),
        probe: Probe::Installed,
    }
}

#[derive(Default)]
struct State {
    override_dir: Option<PathBuf>,
    resolved: Option<Resolved>,
    generation: u64,
}

/// Resolves the models directory once and remembers it until the override changes.
#[derive(Default)]
pub struct DirResolver {
    state: RwLock<State>,
}

impl DirResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose override is already set to `dir`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let resolver = Self::new();
        resolver.set_config_directory(dir);
        resolver
    }

    /// Overrides the configured directory for the rest of the resolver's life.
    ///
    /// Relative paths are resolved against the working directory at probe time. Callers
    /// holding cached documents must drop them; `ModelCatalog::set_config_directory` does.
    pub fn set_config_directory(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(dir = %dir.display(), "models dir override set");
        state.override_dir = Some(dir);
        state.resolved = None;
        state.generation += 1;
    }

    /// Removes the runtime override; the env var and XDG config apply again.
    pub fn clear_config_directory(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.override_dir = None;
        state.resolved = None;
        state.generation += 1;
    }

    pub fn config_directory(&self) -> Option<PathBuf> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .override_dir
            .clone()
    }

    /// Drops the remembered result so the next call probes again.
    pub fn forget(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.resolved = None;
        state.generation += 1;
    }

    pub fn resolve(&self) -> PathBuf {
        self.resolve_with_probe().path
    }

    pub fn resolve_with_probe(&self) -> Resolved {
        let (override_dir, generation) = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(resolved) = &state.resolved {
                return resolved.clone();
            }
            (state.override_dir.clone(), state.generation)
        };
        let resolved = resolve_in(&ProbeContext::capture(override_dir.as_deref()));
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        // An override set while probing wins; don't remember a result computed without it.
        if state.generation == generation {
            state.resolved = Some(resolved.clone());
        }
        resolved
    }
}

impl std::fmt::Debug for DirResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("DirResolver")
            .field("override_dir", &state.override_dir)
            .field("resolved", &state.resolved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(root: &Path) -> ProbeContext {
        ProbeContext {
            configured: None,
            cwd: Some(root.join("work")),
            bundled: root.join("bundled"),
            installed: root.join("installed"),
        }
    }

    fn mkdir(path: &Path) {
        std::fs::create_dir_all(path).unwrap();
    }

    #[test]
    fn configured_dir_wins_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = ctx(tmp.path());
        mkdir(&tmp.path().join("custom"));
        mkdir(&tmp.path().join("work").join(MODELS_SUBDIR));
        c.configured = Some(tmp.path().join("custom"));
        let r = resolve_in(&c);
        assert_eq!(r.probe, Probe::Configured);
        assert_eq!(r.path, tmp.path().join("custom"));
    }

    /// **Scenario**: a configured directory that does not exist falls through to the
    /// working-directory probe instead of failing.
    #[test]
    fn missing_configured_dir_falls_through() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = ctx(tmp.path());
        c.configured = Some(tmp.path().join("does-not-exist"));
        mkdir(&tmp.path().join("work").join(MODELS_SUBDIR));
        let r = resolve_in(&c);
        assert_eq!(r.probe, Probe::WorkingDir);
        assert_eq!(r.path, tmp.path().join("work").join(MODELS_SUBDIR));
    }

    #[test]
    fn bundled_before_ancestors() {
        let tmp = tempfile::tempdir().unwrap();
        let c = ctx(tmp.path());
        mkdir(&tmp.path().join("work"));
        mkdir(&tmp.path().join("bundled"));
        mkdir(&tmp.path().join(MODELS_SUBDIR));
        assert_eq!(resolve_in(&c).probe, Probe::Bundled);
    }

    #[test]
    fn walks_up_to_nearest_ancestor() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = ctx(tmp.path());
        let deep = tmp.path().join("a").join("b").join("c");
        mkdir(&deep);
        mkdir(&tmp.path().join(MODELS_SUBDIR));
        mkdir(&tmp.path().join("a").join(MODELS_SUBDIR));
        c.cwd = Some(deep);
        let r = resolve_in(&c);
        assert_eq!(r.probe, Probe::Ancestor);
        assert_eq!(r.path, tmp.path().join("a").join(MODELS_SUBDIR));
    }

    #[test]
    fn falls_back_to_installed_even_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = ctx(tmp.path());
        c.cwd = None;
        let r = resolve_in(&c);
        assert_eq!(r.probe, Probe::Installed);
        assert_eq!(r.path, tmp.path().join("installed"));
        assert!(!r.path.exists());
    }

    #[test]
    fn file_is_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = ctx(tmp.path());
        let file = tmp.path().join("models.yml");
        std::fs::write(&file, "x").unwrap();
        c.configured = Some(file);
        c.cwd = None;
        assert_eq!(resolve_in(&c).probe, Probe::Installed);
    }

    #[test]
    fn override_is_remembered_and_replaced() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let resolver = DirResolver::with_dir(a.path());
        assert_eq!(resolver.resolve(), a.path());
        assert_eq!(resolver.resolve_with_probe().probe, Probe::Configured);

        resolver.set_config_directory(b.path());
        assert_eq!(resolver.config_directory().as_deref(), Some(b.path()));
        assert_eq!(resolver.resolve(), b.path());
    }

    #[test]
    fn remembered_result_survives_until_forget() {
        let a = tempfile::tempdir().unwrap();
        let dir = a.path().join("models");
        mkdir(&dir);
        let resolver = DirResolver::with_dir(&dir);
        assert_eq!(resolver.resolve(), dir);

        std::fs::remove_dir(&dir).unwrap();
        assert_eq!(resolver.resolve(), dir);

        resolver.forget();
        assert_ne!(resolver.resolve_with_probe().probe, Probe::Configured);
    }

    /// Runs `f` with `MODEL_CATALOG_DIR` and `XDG_CONFIG_HOME` set as given, restoring both.
    fn with_env<T>(models_dir: Option<&str>, xdg_home: &Path, f: impl FnOnce() -> T) -> T {
        let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let prev_dir = std::env::var_os(MODELS_DIR_ENV);
        let prev_xdg = std::env::var_os("XDG_CONFIG_HOME");
        match models_dir {
            Some(v) => std::env::set_var(MODELS_DIR_ENV, v),
            None => std::env::remove_var(MODELS_DIR_ENV),
        }
        std::env::set_var("XDG_CONFIG_HOME", xdg_home);
        let out = f();
        match prev_dir {
            Some(v) => std::env::set_var(MODELS_DIR_ENV, v),
            None => std::env::remove_var(MODELS_DIR_ENV),
        }
        match prev_xdg {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        out
    }

    fn write_xdg_models_dir(xdg_home: &Path, dir: &Path) {
        let app_dir = xdg_home.join(APP_NAME);
        mkdir(&app_dir);
        std::fs::write(
            app_dir.join("config.toml"),
            format!("[models]\ndir = \"{}\"\n", dir.display()),
        )
        .unwrap();
    }

    #[test]
    fn override_beats_env_var() {
        let tmp = tempfile::tempdir().unwrap();
        let from_env = tmp.path().join("env");
        let explicit = tmp.path().join("explicit");
        let ctx = with_env(from_env.to_str(), &tmp.path().join("xdg"), || {
            ProbeContext::capture(Some(&explicit))
        });
        assert_eq!(ctx.configured, Some(explicit));
    }

    /// **Scenario**: with no override, `MODEL_CATALOG_DIR` is used even when the XDG
    /// config also names a directory.
    #[test]
    fn env_var_beats_xdg_config() {
        let tmp = tempfile::tempdir().unwrap();
        let xdg_home = tmp.path().join("xdg");
        let from_env = tmp.path().join("env");
        let from_xdg = tmp.path().join("from-xdg");
        mkdir(&from_env);
        mkdir(&from_xdg);
        write_xdg_models_dir(&xdg_home, &from_xdg);

        let ctx = with_env(from_env.to_str(), &xdg_home, || ProbeContext::capture(None));
        assert_eq!(ctx.configured, Some(from_env.clone()));
        let resolved = resolve_in(&ctx);
        assert_eq!(resolved.probe, Probe::Configured);
        assert_eq!(resolved.path, from_env);
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let xdg_home = tmp.path().join("xdg");
        let from_xdg = tmp.path().join("from-xdg");
        write_xdg_models_dir(&xdg_home, &from_xdg);

        let ctx = with_env(Some(""), &xdg_home, || ProbeContext::capture(None));
        assert_eq!(ctx.configured, Some(from_xdg));
    }

    #[test]
    fn nothing_configured_leaves_step_one_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = with_env(None, &tmp.path().join("xdg"), || ProbeContext::capture(None));
        assert_eq!(ctx.configured, None);
    }

    #[test]
    fn resolver_without_override_reads_env_var() {
        let tmp = tempfile::tempdir().unwrap();
        let from_env = tmp.path().join("env");
        mkdir(&from_env);
        let resolved = with_env(from_env.to_str(), &tmp.path().join("xdg"), || {
            DirResolver::new().resolve_with_probe()
        });
        assert_eq!(resolved.probe, Probe::Configured);
        assert_eq!(resolved.path, from_env);
    }
}
