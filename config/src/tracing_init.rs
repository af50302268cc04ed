//! Tracing subscriber setup shared by binaries (feature `tracing-init`).

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// When set, logs go to a daily-rolling file in this directory instead of stderr.
pub const LOG_DIR_ENV: &str = "MODEL_CATALOG_LOG_DIR";

/// Installs a global fmt subscriber.
///
/// Filter comes from `RUST_LOG`; without it, `warn` (or `debug` when `verbose`).
/// Returns the appender guard when logging to a file; keep it alive until exit so
/// buffered lines are flushed. Calling twice is harmless: the second install is ignored.
pub fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match std::env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
        Some(dir) => {
            let appender =
                tracing_appender::rolling::daily(PathBuf::from(dir), format!("{}.log", crate::APP_NAME));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
    }
}
