//! Logging setup: a stderr layer plus a daily rolling log file.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of log file names.
pub const LOG_FILE_PREFIX: &str = "sharetex";

/// Log files older than this are deleted at start-up.
pub const MAX_LOG_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Keeps the background log writer alive. Dropping it flushes the file.
#[must_use = "logs stop being written when the guard is dropped"]
pub struct LoggerGuard(#[allow(dead_code)] WorkerGuard);

/// Install the global subscriber.
///
/// `level` is the default filter; `RUST_LOG` overrides it. Unknown levels
/// fall back to `info`. Old log files in `log_dir` are removed first.
pub fn init_logging(log_dir: &Path, level: &str) -> io::Result<LoggerGuard> {
    fs::create_dir_all(log_dir)?;

    let level = if LEVELS.contains(&level) { level } else { "info" };
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let builder = EnvFilter::builder().with_default_directive(
        level
            .parse()
            .unwrap_or_else(|_| tracing::level_filters::LevelFilter::INFO.into()),
    );
    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(io::Error::other)?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(io::Error::other)?;

    match cleanup_old_logs(log_dir, LOG_FILE_PREFIX, MAX_LOG_AGE, SystemTime::now()) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "Old log files deleted"),
        Err(e) => tracing::warn!("Failed to delete old log files: {}", e),
    }

    Ok(LoggerGuard(guard))
}

/// Delete `{prefix}*.log` files in `log_dir` last modified more than
/// `max_age` before `now`. Returns how many were removed.
pub fn cleanup_old_logs(
    log_dir: &Path,
    prefix: &str,
    max_age: Duration,
    now: SystemTime,
) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !(file_name.starts_with(prefix) && file_name.ends_with(".log")) {
            continue;
        }
        let modified = fs::metadata(&path)?.modified()?;
        if now.duration_since(modified).unwrap_or_default() > max_age {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_removes_only_old_matching_logs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sharetex.2024-01-01.log"), b"old").unwrap();
        fs::write(temp.path().join("other.2024-01-01.log"), b"keep").unwrap();
        fs::write(temp.path().join("sharetex.notes.txt"), b"keep").unwrap();

        // Pretend it is a week later
        let later = SystemTime::now() + Duration::from_secs(60 * 60 * 24 * 7);
        let removed = cleanup_old_logs(temp.path(), LOG_FILE_PREFIX, MAX_LOG_AGE, later).unwrap();

        assert_eq!(removed, 1);
        assert!(!temp.path().join("sharetex.2024-01-01.log").exists());
        assert!(temp.path().join("other.2024-01-01.log").exists());
        assert!(temp.path().join("sharetex.notes.txt").exists());
    }

    #[test]
    fn test_cleanup_keeps_recent_logs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sharetex.today.log"), b"new").unwrap();
        let removed =
            cleanup_old_logs(temp.path(), LOG_FILE_PREFIX, MAX_LOG_AGE, SystemTime::now()).unwrap();
        assert_eq!(removed, 0);
    }
}
