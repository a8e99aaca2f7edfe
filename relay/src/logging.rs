//! Tracing subscriber setup.
//!
//! Structured JSON goes to stdout. With `LOG_DIR` set, the same events are
//! also written to a daily rolling `relay.log.<date>` in that directory,
//! keeping at most [`MAX_LOG_FILES`] files.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for the rolling log.
pub const LOG_FILE_NAME: &str = "relay.log";

/// Current file plus three rotated ones.
pub const MAX_LOG_FILES: usize = 4;

/// Build the rolling file appender; creates `dir` if needed.
pub fn file_appender(dir: impl AsRef<Path>) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init(log_dir: Option<&str>) -> Result<Option<WorkerGuard>, InitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(dir)?);
            let layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = std::env::temp_dir().join(format!("relay-log-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let appender = file_appender(&dir);

        assert!(appender.is_ok());
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_appender_rejects_file_path() {
        let path = std::env::temp_dir().join(format!("relay-log-file-{}", std::process::id()));
        std::fs::write(&path, b"not a directory").unwrap();

        let appender = file_appender(&path);

        assert!(appender.is_err());
        let _ = std::fs::remove_file(&path);
    }
}
