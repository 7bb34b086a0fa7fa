use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive (e.g. `debug`).
pub const LOG_ENV: &str = "RECENTFILES_LOG";

/// Log directory: `<cache_dir>/recentfiles/logs`.
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("recentfiles").join("logs"))
}

/// Route tracing output to a daily rolling file. The terminal belongs to the
/// UI, so nothing is written to stdout or stderr. Returns the writer guard,
/// which must live until exit so buffered lines get flushed.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::daily(&dir, "recentfiles.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
