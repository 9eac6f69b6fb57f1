//! Tracing setup. Logs go to a file under the XDG state dir so they never
//! interleave with console output; stderr is the fallback.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "gradebook.log";

const FILE_FILTER: &str = "info,gradebook=debug,gradebook_core=debug";

/// Stderr shares the terminal with command output.
const STDERR_FILTER: &str = "warn";

/// Where log events end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// `~/.local/state/gradebook/gradebook.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gradebook")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("gradebook")
        .join(LOG_FILE_NAME))
}

/// `RUST_LOG` wins over the built-in default.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber writing to [`log_path`].
/// Errors if the file cannot be opened or a subscriber is already set.
pub fn init_logging() -> Result<LogSink> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!(path = %path.display(), "gradebook logging initialized");
    Ok(LogSink::File(path))
}

/// Warnings and errors only, on stderr.
pub fn init_logging_stderr() -> LogSink {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(STDERR_FILTER))
        .with_writer(io::stderr)
        .try_init();
    LogSink::Stderr
}
