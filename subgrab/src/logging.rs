//! Optional file logging.
//!
//! The terminal is owned by the UI, so log output can only go to a file. Nothing
//! is installed unless `RUST_LOG` or the config's `log_level` asks for it; by
//! default subgrab leaves no log behind.

use std::path::PathBuf;

use subgrab_core::config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directory holding `subgrab.log.<date>` files.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subgrab")
        .join("logs")
}

/// Installs a daily-rolling file subscriber when logging is requested.
///
/// Returns the appender guard, which must be held for the life of the process
/// so buffered lines are flushed on exit. Returns `None` when logging is off
/// or the filter/directory is unusable (reported on stderr before the TUI starts).
pub fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| config.log_level.clone())?;

    let filter = match EnvFilter::try_new(&directive) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("subgrab: invalid log filter {:?}: {}", directive, e);
            return None;
        }
    };

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("subgrab: cannot create log dir {:?}: {}", dir, e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&dir, "subgrab.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true),
        )
        .init();

    Some(guard)
}
