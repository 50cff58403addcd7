//! Tracing subscriber initialization.
//!
//! Logs go to a file: stdout carries the quote box and must stay clean,
//! especially when the shell startup hook runs us with `--silent`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split `log_path` into directory and file name, creating the directory.
///
/// A bare file name logs into the current directory.
pub fn prepare_log_location(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?
        .to_string();

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    Ok((directory, file_name))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. The file is appended
/// to and never rotated; one run writes a handful of lines.
///
/// # Errors
///
/// Returns `LoggingError` if the log location is unusable or a subscriber
/// was already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = prepare_log_location(log_path)?;
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn prepare_creates_missing_directories() {
        let temp = TempDir::new().expect("temp dir");
        let log_file = temp.path().join("a").join("b").join("quoteme.log");

        let (directory, file_name) = prepare_log_location(&log_file).expect("prepare");

        assert!(directory.is_dir(), "Log directory should be created");
        assert_eq!(file_name, "quoteme.log");
    }

    #[test]
    fn prepare_accepts_bare_file_name() {
        let (directory, file_name) =
            prepare_log_location(Path::new("quoteme.log")).expect("prepare");
        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file_name, "quoteme.log");
    }

    #[test]
    fn prepare_rejects_path_without_file_name() {
        let result = prepare_log_location(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_even_if_subscriber_exists() {
        let temp = TempDir::new().expect("temp dir");
        let log_dir = temp.path().join("logs");
        let log_file = log_dir.join("test.log");

        // May fail with SubscriberAlreadySet when another test got there first.
        let _ = init(&log_file);

        assert!(log_dir.exists(), "Log directory should exist: {:?}", log_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let temp = TempDir::new().expect("temp dir");
        let log_file = temp.path().join("twice.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
    }
}
