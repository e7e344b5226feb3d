//! Logging initialisation for liquid-scale.
//!
//! When the `LIQUID_LOG` environment variable is set to `1`, structured
//! logs are also written to the OS log directory under
//! `liquid-scale/liquid-scale.log`. Otherwise only stderr output (filtered by
//! `RUST_LOG`) is enabled.
//!
//! Returns a guard that must be kept alive for the duration of the process
//! so that buffered log lines are flushed on exit.

use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const APP_NAME: &str = "liquid-scale";

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialise the global tracing subscriber.
///
/// Call once from `main` and hold the returned `LogGuard` until exit.
pub fn init() -> LogGuard {
    let file_guard = if std::env::var("LIQUID_LOG").as_deref() == Ok("1") {
        let dir = log_dir().unwrap_or_else(std::env::temp_dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("liquid-scale: cannot create log dir {}: {e}", dir.display());
        }
        let file_appender = tracing_appender::rolling::never(&dir, "liquid-scale.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();

        None
    };

    LogGuard { _file_guard: file_guard }
}

fn log_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg).join(APP_NAME));
    }
    let home = PathBuf::from(std::env::var("HOME").ok()?);
    #[cfg(target_os = "macos")]
    let base = home.join("Library").join("Logs");
    #[cfg(not(target_os = "macos"))]
    let base = home.join(".local").join("share");
    Some(base.join(APP_NAME))
}
