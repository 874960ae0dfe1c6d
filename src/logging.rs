//! File logging for the gate. Lines rotate daily so a long-lived install
//! never grows a single unbounded log file.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log directory unavailable: {0}")]
    Directory(String),
    #[error("logger init failed: {0}")]
    Init(String),
}

/// Installs the global daily-rolling file logger. The returned guard must be
/// held for the life of the process so buffered lines are flushed on exit.
pub fn init_logging(log_dir: impl AsRef<Path>) -> Result<WorkerGuard, LoggingError> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir).map_err(|e| LoggingError::Directory(format!("{e}")))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "latchkey.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Init(format!("{e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use tempfile::tempdir;

    #[test]
    fn creates_the_log_directory() {
        let dir = tempdir().expect("temp dir");
        let log_dir = dir.path().join("logs");
        // Only the first init in a process can claim the global subscriber;
        // either way the directory must exist afterwards.
        let _guard = init_logging(&log_dir);
        assert!(log_dir.is_dir());
    }
}
